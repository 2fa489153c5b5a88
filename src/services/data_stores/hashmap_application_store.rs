use crate::domain::{
    ApplicationStore, ApplicationStoreError, MemberApplication,
};

/// In-memory application store, used by the test suite and local
/// development. Insertion order is preserved.
#[derive(Default)]
pub struct HashmapApplicationStore {
    applications: Vec<MemberApplication>,
}

#[async_trait::async_trait]
impl ApplicationStore for HashmapApplicationStore {
    async fn add_application(
        &mut self,
        application: &MemberApplication,
    ) -> Result<(), ApplicationStoreError> {
        self.applications.push(application.clone());
        Ok(())
    }

    async fn get_applications(
        &self,
    ) -> Result<Vec<MemberApplication>, ApplicationStoreError> {
        Ok(self.applications.clone())
    }

    async fn find_application_by_applicant(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<MemberApplication>, ApplicationStoreError> {
        Ok(self
            .applications
            .iter()
            .find(|a| a.first_name == first_name && a.last_name == last_name)
            .cloned())
    }
}
