use actix_web::{web, HttpResponse, Result};
use extractors::{normalize_phone, PhoneNormalization};
use shared_types::{
    CreateContactRequest, DeleteContactResponse, UpdateContactRequest, DEFAULT_CONTACT_GROUP,
};
use std::sync::Arc;

use crate::database::contacts::{self as contacts_db, NewContact};
use crate::database::{Database, DbError};
use crate::error::ApiError;
use crate::handlers::AdminSession;

const CONTACT_NOT_FOUND: &str = "Contact not found";
const NAME_AND_PHONE_REQUIRED: &str = "Name and phone number are required";

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Validate the shared create/update body and normalize its phone number.
fn contact_fields(
    name: Option<String>,
    phone_number: Option<String>,
    email: Option<String>,
    group: Option<String>,
    mode: PhoneNormalization,
    user_id: Option<i64>,
) -> std::result::Result<NewContact, ApiError> {
    let (Some(name), Some(phone)) = (non_blank(name), non_blank(phone_number)) else {
        return Err(ApiError::Validation(NAME_AND_PHONE_REQUIRED.to_string()));
    };

    let phone_number = normalize_phone(phone.trim(), mode);
    if !phone_number.chars().any(|c| c.is_ascii_digit()) {
        return Err(ApiError::Validation(
            "Phone number must contain digits".to_string(),
        ));
    }

    Ok(NewContact {
        name: name.trim().to_string(),
        phone_number,
        email: non_blank(email).map(|e| e.trim().to_string()),
        group: non_blank(group)
            .map(|g| g.trim().to_string())
            .unwrap_or_else(|| DEFAULT_CONTACT_GROUP.to_string()),
        user_id,
    })
}

fn not_found_or_internal(message: &'static str) -> impl Fn(DbError) -> ApiError {
    move |e| match e {
        DbError::NotFound => ApiError::NotFound(CONTACT_NOT_FOUND.to_string()),
        other => ApiError::internal(message, other),
    }
}

pub async fn list_contacts(
    _session: AdminSession,
    db: web::Data<Arc<Database>>,
) -> Result<HttpResponse> {
    let contacts = contacts_db::list_contacts(db.async_connection.clone())
        .await
        .map_err(|e| ApiError::internal("Failed to fetch contacts", e))?;

    Ok(HttpResponse::Ok().json(contacts))
}

pub async fn list_groups(
    _session: AdminSession,
    db: web::Data<Arc<Database>>,
) -> Result<HttpResponse> {
    let groups = contacts_db::list_groups(db.async_connection.clone())
        .await
        .map_err(|e| ApiError::internal("Failed to fetch contact groups", e))?;

    Ok(HttpResponse::Ok().json(groups))
}

pub async fn create_contact(
    session: AdminSession,
    db: web::Data<Arc<Database>>,
    request: web::Json<CreateContactRequest>,
) -> Result<HttpResponse> {
    let req = request.into_inner();
    let fields = contact_fields(
        req.name,
        req.phone_number,
        req.email,
        req.group,
        PhoneNormalization::StripThenPrefix,
        session.user.id,
    )?;

    let contact = contacts_db::insert_contact(db.async_connection.clone(), &fields)
        .await
        .map_err(|e| ApiError::internal("Failed to create contact", e))?;

    Ok(HttpResponse::Created().json(contact))
}

pub async fn get_contact(
    _session: AdminSession,
    db: web::Data<Arc<Database>>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let contact_id = path.into_inner();

    let contact = contacts_db::get_contact(db.async_connection.clone(), contact_id)
        .await
        .map_err(not_found_or_internal("Failed to fetch contact"))?;

    Ok(HttpResponse::Ok().json(contact))
}

pub async fn update_contact(
    _session: AdminSession,
    db: web::Data<Arc<Database>>,
    path: web::Path<i64>,
    request: web::Json<UpdateContactRequest>,
) -> Result<HttpResponse> {
    let contact_id = path.into_inner();
    let req = request.into_inner();

    let fields = contact_fields(
        req.name,
        req.phone_number,
        req.email,
        req.group,
        PhoneNormalization::PreserveIfPrefixed,
        None,
    )?;

    let contact = contacts_db::update_contact(db.async_connection.clone(), contact_id, &fields)
        .await
        .map_err(not_found_or_internal("Failed to update contact"))?;

    Ok(HttpResponse::Ok().json(contact))
}

pub async fn delete_contact(
    _session: AdminSession,
    db: web::Data<Arc<Database>>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let contact_id = path.into_inner();

    contacts_db::delete_contact(db.async_connection.clone(), contact_id)
        .await
        .map_err(not_found_or_internal("Failed to delete contact"))?;

    Ok(HttpResponse::Ok().json(DeleteContactResponse { success: true }))
}
