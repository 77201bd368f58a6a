use rusqlite::{params, Row};
use shared_types::{Contact, ContactGroup, ALL_GROUPS};

use crate::database::{AsyncDbConnection, DbError};

const CONTACT_COLUMNS: &str =
    "id, name, phone_number, email, contact_group, user_id, created_at, updated_at";

/// Column values for a contact insert or full update.
#[derive(Debug, Clone)]
pub struct NewContact {
    pub name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub group: String,
    pub user_id: Option<i64>,
}

fn contact_from_row(row: &Row<'_>) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: row.get(0)?,
        name: row.get(1)?,
        phone_number: row.get(2)?,
        email: row.get(3)?,
        group: row.get(4)?,
        user_id: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

pub async fn insert_contact(conn: AsyncDbConnection, contact: &NewContact) -> Result<Contact, DbError> {
    let conn = conn.lock().await?;
    let now = chrono::Utc::now().timestamp();

    let created = conn.query_row(
        &format!(
            "INSERT INTO contacts
             (name, phone_number, email, contact_group, user_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
             RETURNING {CONTACT_COLUMNS}"
        ),
        params![
            &contact.name,
            &contact.phone_number,
            contact.email.as_ref(),
            &contact.group,
            contact.user_id,
            now
        ],
        contact_from_row,
    )?;

    Ok(created)
}

pub async fn get_contact(conn: AsyncDbConnection, id: i64) -> Result<Contact, DbError> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1"
    ))?;

    Ok(stmt.query_row([id], contact_from_row)?)
}

/// All contacts, name ascending.
pub async fn list_contacts(conn: AsyncDbConnection) -> Result<Vec<Contact>, DbError> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY name ASC, id ASC"
    ))?;

    let contacts = stmt
        .query_map([], contact_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(contacts)
}

/// Contacts selected by a group filter: `"all"` or an exact group name.
pub async fn list_contacts_in_group(
    conn: AsyncDbConnection,
    group: &str,
) -> Result<Vec<Contact>, DbError> {
    if group == ALL_GROUPS {
        return list_contacts(conn).await;
    }

    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {CONTACT_COLUMNS} FROM contacts
         WHERE contact_group = ?1
         ORDER BY name ASC, id ASC"
    ))?;

    let contacts = stmt
        .query_map([group], contact_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(contacts)
}

pub async fn list_groups(conn: AsyncDbConnection) -> Result<Vec<ContactGroup>, DbError> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(
        "SELECT contact_group, COUNT(*) FROM contacts
         GROUP BY contact_group
         ORDER BY contact_group ASC",
    )?;

    let groups = stmt
        .query_map([], |row| {
            Ok(ContactGroup {
                group: row.get(0)?,
                contact_count: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(groups)
}

/// Overwrite every editable column. `user_id` is left untouched.
pub async fn update_contact(
    conn: AsyncDbConnection,
    id: i64,
    contact: &NewContact,
) -> Result<Contact, DbError> {
    let conn = conn.lock().await?;
    let now = chrono::Utc::now().timestamp();

    let updated = conn.query_row(
        &format!(
            "UPDATE contacts
             SET name = ?1, phone_number = ?2, email = ?3, contact_group = ?4, updated_at = ?5
             WHERE id = ?6
             RETURNING {CONTACT_COLUMNS}"
        ),
        params![
            &contact.name,
            &contact.phone_number,
            contact.email.as_ref(),
            &contact.group,
            now,
            id
        ],
        contact_from_row,
    )?;

    Ok(updated)
}

pub async fn delete_contact(conn: AsyncDbConnection, id: i64) -> Result<(), DbError> {
    let conn = conn.lock().await?;

    let affected = conn.execute("DELETE FROM contacts WHERE id = ?1", [id])?;
    if affected == 0 {
        return Err(DbError::NotFound);
    }

    Ok(())
}

pub async fn count_contacts(conn: AsyncDbConnection) -> Result<i64, DbError> {
    let conn = conn.lock().await?;
    Ok(conn.query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::temp_database;

    fn new_contact(name: &str, phone: &str, group: &str) -> NewContact {
        NewContact {
            name: name.to_string(),
            phone_number: phone.to_string(),
            email: None,
            group: group.to_string(),
            user_id: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let (_dir, db) = temp_database();
        let conn = db.async_connection.clone();

        let created = insert_contact(conn.clone(), &new_contact("Ada", "+15550001", "Default"))
            .await
            .unwrap();
        let fetched = get_contact(conn, created.id).await.unwrap();

        assert_eq!(created, fetched);
        assert_eq!(fetched.group, "Default");
        assert_eq!(fetched.created_at, fetched.updated_at);
    }

    #[tokio::test]
    async fn test_list_is_name_ascending() {
        let (_dir, db) = temp_database();
        let conn = db.async_connection.clone();

        for name in ["Zoe", "Ada", "Max"] {
            insert_contact(conn.clone(), &new_contact(name, "+1555", "Default"))
                .await
                .unwrap();
        }

        let names: Vec<String> = list_contacts(conn)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Ada", "Max", "Zoe"]);
    }

    #[tokio::test]
    async fn test_group_filter() {
        let (_dir, db) = temp_database();
        let conn = db.async_connection.clone();

        insert_contact(conn.clone(), &new_contact("Ada", "+1", "VIP")).await.unwrap();
        insert_contact(conn.clone(), &new_contact("Bob", "+2", "Default")).await.unwrap();
        insert_contact(conn.clone(), &new_contact("Cy", "+3", "vip")).await.unwrap();

        let vip = list_contacts_in_group(conn.clone(), "VIP").await.unwrap();
        assert_eq!(vip.len(), 1);
        assert_eq!(vip[0].name, "Ada");

        let all = list_contacts_in_group(conn.clone(), "all").await.unwrap();
        assert_eq!(all.len(), 3);

        let groups = list_groups(conn).await.unwrap();
        assert_eq!(
            groups
                .iter()
                .map(|g| (g.group.as_str(), g.contact_count))
                .collect::<Vec<_>>(),
            vec![("Default", 1), ("VIP", 1), ("vip", 1)]
        );
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let (_dir, db) = temp_database();
        let conn = db.async_connection.clone();

        let result = update_contact(conn.clone(), 42, &new_contact("X", "+1", "Default")).await;
        assert!(matches!(result, Err(DbError::NotFound)));

        let result = delete_contact(conn.clone(), 42).await;
        assert!(matches!(result, Err(DbError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_overwrites_fields() {
        let (_dir, db) = temp_database();
        let conn = db.async_connection.clone();

        let created = insert_contact(conn.clone(), &new_contact("Ada", "+1", "Default"))
            .await
            .unwrap();

        let mut changes = new_contact("Ada L.", "+44", "VIP");
        changes.email = Some("ada@example.com".to_string());
        let updated = update_contact(conn.clone(), created.id, &changes).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Ada L.");
        assert_eq!(updated.phone_number, "+44");
        assert_eq!(updated.email.as_deref(), Some("ada@example.com"));
        assert_eq!(updated.group, "VIP");

        delete_contact(conn.clone(), created.id).await.unwrap();
        assert_eq!(count_contacts(conn).await.unwrap(), 0);
    }
}
