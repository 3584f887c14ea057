use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use database_model::prelude::ProfileModel;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Staff profile. Its id always matches the auth identity id; rows are
/// created only through the provisioning service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub dealership_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: ProfileStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Manager,
    Technician,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileStatus {
    Active,
    Inactive,
}

impl Profile {
    pub fn is_active(&self) -> bool {
        self.status == ProfileStatus::Active
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Owner => "owner",
            Role::Manager => "manager",
            Role::Technician => "technician",
        })
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Role::Owner),
            "manager" => Ok(Role::Manager),
            "technician" => Ok(Role::Technician),
            other => Err(anyhow!("invalid role: {other}")),
        }
    }
}

impl fmt::Display for ProfileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProfileStatus::Active => "active",
            ProfileStatus::Inactive => "inactive",
        })
    }
}

impl FromStr for ProfileStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ProfileStatus::Active),
            "inactive" => Ok(ProfileStatus::Inactive),
            other => Err(anyhow!("invalid profile status: {other}")),
        }
    }
}

impl TryFrom<ProfileModel> for Profile {
    type Error = anyhow::Error;

    fn try_from(model: ProfileModel) -> Result<Self, Self::Error> {
        let ProfileModel {
            id,
            dealership_id,
            name,
            email,
            role,
            status,
        } = model;

        Ok(Self {
            id,
            dealership_id,
            name,
            email,
            role: role.parse()?,
            status: status.parse()?,
        })
    }
}

impl From<Profile> for ProfileModel {
    fn from(entity: Profile) -> Self {
        Self {
            id: entity.id,
            dealership_id: entity.dealership_id,
            name: entity.name,
            email: entity.email,
            role: entity.role.to_string(),
            status: entity.status.to_string(),
        }
    }
}
