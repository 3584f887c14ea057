use architecture::repository::{DBRepository, MutableRepository, ReadOnlyRepository};
use database_model::prelude::*;
use domain_account::{
    model::entity::profile::{Profile, ProfileStatus, Role},
    repository::ProfileRepo,
};
use sea_orm::prelude::*;

use super::SeaOrmRepository;

#[async_trait::async_trait]
impl ReadOnlyRepository<Profile> for SeaOrmRepository {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Profile>> {
        ProfileEntity::find_by_id(id)
            .one(self.db.get_connection())
            .await?
            .map(Profile::try_from)
            .transpose()
    }
}

#[async_trait::async_trait]
impl MutableRepository<Profile> for SeaOrmRepository {
    async fn insert(&self, entity: &Profile) -> anyhow::Result<()> {
        ProfileEntity::insert(
            ProfileActiveModel::from(ProfileModel::from(entity.clone())).reset_all(),
        )
        .exec(self.db.get_connection())
        .await?;
        Ok(())
    }

    async fn update(&self, entity: &Profile) -> anyhow::Result<()> {
        ProfileEntity::update(
            ProfileActiveModel::from(ProfileModel::from(entity.clone())).reset_all(),
        )
        .exec(self.db.get_connection())
        .await?;
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = ProfileEntity::delete_by_id(id).exec(self.db.get_connection()).await?;
        Ok(result.rows_affected > 0)
    }
}

impl DBRepository<Profile> for SeaOrmRepository {}

#[async_trait::async_trait]
impl ProfileRepo for SeaOrmRepository {
    async fn list_by_dealership(&self, dealership_id: Uuid) -> anyhow::Result<Vec<Profile>> {
        ProfileEntity::find()
            .filter(ProfileColumn::DealershipId.eq(dealership_id))
            .all(self.db.get_connection())
            .await?
            .into_iter()
            .map(Profile::try_from)
            .collect()
    }

    async fn list_active_in_roles(
        &self,
        dealership_id: Uuid,
        roles: &[Role],
    ) -> anyhow::Result<Vec<Profile>> {
        let role_names: Vec<String> = roles.iter().map(Role::to_string).collect();
        ProfileEntity::find()
            .filter(ProfileColumn::DealershipId.eq(dealership_id))
            .filter(ProfileColumn::Status.eq(ProfileStatus::Active.to_string()))
            .filter(ProfileColumn::Role.is_in(role_names))
            .all(self.db.get_connection())
            .await?
            .into_iter()
            .map(Profile::try_from)
            .collect()
    }
}
