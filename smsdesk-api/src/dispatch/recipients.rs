use shared_types::Recipient;

use crate::database::contacts::list_contacts_in_group;
use crate::database::{AsyncDbConnection, DbError};

/// Resolve a group filter (`"all"` or an exact group name) to recipients,
/// ordered by contact name. Recomputed on every send.
pub async fn select_recipients(
    conn: AsyncDbConnection,
    group: &str,
) -> Result<Vec<Recipient>, DbError> {
    let contacts = list_contacts_in_group(conn, group).await?;

    Ok(contacts
        .into_iter()
        .map(|contact| Recipient {
            phone_number: contact.phone_number,
            name: Some(contact.name),
        })
        .collect())
}
