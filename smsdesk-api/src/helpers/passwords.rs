use actix_web::web;

/// bcrypt work factor for stored admin passwords.
pub const PASSWORD_HASH_COST: u32 = 12;

/// Hash on the blocking pool; bcrypt at this cost takes a few hundred ms.
pub async fn hash_password(password: String) -> anyhow::Result<String> {
    let hashed = web::block(move || bcrypt::hash(password, PASSWORD_HASH_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Password hashing task failed: {}", e))??;
    Ok(hashed)
}

pub async fn verify_password(password: String, hash: String) -> anyhow::Result<bool> {
    let valid = web::block(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| anyhow::anyhow!("Password verification task failed: {}", e))??;
    Ok(valid)
}
