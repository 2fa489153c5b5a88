use std::collections::{BTreeSet, HashMap};

use crate::domain::{
    CategoryTitle, Member, MemberName, MemberStore, MemberStoreError,
};

/// In-memory member store, used by the test suite and local development.
#[derive(Default)]
pub struct HashmapMemberStore {
    members: HashMap<i32, Member>,
    categories: BTreeSet<CategoryTitle>,
}

#[async_trait::async_trait]
impl MemberStore for HashmapMemberStore {
    async fn upsert_member(
        &mut self,
        member: &Member,
    ) -> Result<(), MemberStoreError> {
        let categories = self
            .members
            .get(&member.order)
            .map(|existing| existing.categories.clone())
            .unwrap_or_default();

        let mut stored = member.clone();
        stored.categories = categories;
        self.members.insert(member.order, stored);
        Ok(())
    }

    async fn set_categories(
        &mut self,
        order: i32,
        categories: &[CategoryTitle],
    ) -> Result<(), MemberStoreError> {
        let member = self
            .members
            .get_mut(&order)
            .ok_or(MemberStoreError::MemberNotFound)?;

        for category in categories {
            self.categories.insert(category.clone());
        }
        member.categories = categories.to_vec();
        Ok(())
    }

    async fn get_all_members(&self) -> Result<Vec<Member>, MemberStoreError> {
        let mut members: Vec<Member> = self.members.values().cloned().collect();
        members.sort_by_key(|m| m.order);
        Ok(members)
    }

    async fn get_members_by_category(
        &self,
        category_title: &str,
    ) -> Result<Vec<Member>, MemberStoreError> {
        let mut members: Vec<Member> = self
            .members
            .values()
            .filter(|m| {
                m.categories
                    .iter()
                    .any(|c| c.as_ref() == category_title)
            })
            .cloned()
            .collect();
        members.sort_by_key(|m| m.order);
        Ok(members)
    }

    async fn find_member_by_name(
        &self,
        name: &MemberName,
    ) -> Result<Option<Member>, MemberStoreError> {
        Ok(self
            .members
            .values()
            .find(|m| &m.name == name)
            .cloned())
    }

    async fn find_member_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Member>, MemberStoreError> {
        Ok(self
            .members
            .values()
            .find(|m| m.email == email)
            .cloned())
    }

    async fn set_member_image(
        &mut self,
        order: i32,
        image: &str,
    ) -> Result<(), MemberStoreError> {
        let member = self
            .members
            .get_mut(&order)
            .ok_or(MemberStoreError::MemberNotFound)?;
        member.image = Some(image.to_owned());
        Ok(())
    }

    async fn list_categories(
        &self,
    ) -> Result<Vec<CategoryTitle>, MemberStoreError> {
        Ok(self.categories.iter().cloned().collect())
    }

    async fn create_category(
        &mut self,
        title: &CategoryTitle,
    ) -> Result<(), MemberStoreError> {
        self.categories.insert(title.clone());
        Ok(())
    }
}
