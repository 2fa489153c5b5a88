use color_eyre::eyre::eyre;

use crate::{
    app_state::{MemberStoreType, ProjectStoreType},
    domain::{Leader, ProjectAPIError, ProjectName},
};

/// Replaces a project's leader set from a list of member emails.
///
/// Emails that do not resolve to a roster member are skipped and
/// returned, never aborting the synchronization; the relation itself is
/// replaced in one transaction by the store. The same policy applies to
/// the import CLI and the HTTP creation path.
#[tracing::instrument(name = "Synchronizing project leaders", skip_all)]
pub async fn sync_project_leaders(
    member_store: &MemberStoreType,
    project_store: &ProjectStoreType,
    project_name: &ProjectName,
    leader_emails: &[String],
) -> Result<Vec<String>, ProjectAPIError> {
    let mut leaders = Vec::new();
    let mut leaders_not_found = Vec::new();

    for email in leader_emails {
        let member = member_store
            .read()
            .await
            .find_member_by_email(email)
            .await
            .map_err(|e| ProjectAPIError::UnexpectedError(eyre!(e)))?;

        match member {
            Some(member) => leaders.push(Leader {
                member_order: member.order,
                email: email.clone(),
            }),
            None => {
                tracing::warn!(email, "leader email does not match any member");
                leaders_not_found.push(email.clone());
            }
        }
    }

    project_store
        .write()
        .await
        .set_leaders(project_name, &leaders)
        .await
        .map_err(|e| ProjectAPIError::UnexpectedError(eyre!(e)))?;

    Ok(leaders_not_found)
}
