use architecture::repository::DBRepository;

use crate::model::entity::Dealership;

pub trait DealershipRepo: DBRepository<Dealership> + Send + Sync {}
