use std::sync::Arc;

use serde::Deserialize;

use super::domain::{Cgpa, RoleProfile, User, UserId, UserRole};
use super::errors::PlacementError;
use super::repository::{RepositoryError, UserRepository};

/// Partial profile update. Role is not part of the patch; it is fixed by the
/// profile variant, and fields that do not apply to the user's role are
/// ignored the way the original record update endpoint ignored them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub cgpa: Option<f32>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
}

/// Read and profile-maintenance surface over user records. Registration and
/// credentials live outside the placement workflow.
pub struct UserDirectory<S> {
    store: Arc<S>,
}

impl<S> UserDirectory<S>
where
    S: UserRepository + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn get(&self, id: &UserId) -> Result<User, PlacementError> {
        self.store
            .fetch_user(id)?
            .ok_or(PlacementError::NotFound("user"))
    }

    pub fn by_role(&self, role: UserRole) -> Result<Vec<User>, PlacementError> {
        Ok(self.store.users_by_role(role)?)
    }

    pub fn update_profile(
        &self,
        id: &UserId,
        update: ProfileUpdate,
    ) -> Result<User, PlacementError> {
        let mut user = self
            .store
            .fetch_user(id)?
            .ok_or(PlacementError::NotFound("user"))?;

        if let Some(full_name) = update.full_name {
            user.full_name = full_name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(phone) = update.phone {
            user.phone = Some(phone);
        }
        match &mut user.profile {
            RoleProfile::Student(profile) => {
                if let Some(department) = update.department {
                    profile.department = department;
                }
                if let Some(cgpa) = update.cgpa {
                    profile.cgpa = Cgpa::Recorded(cgpa);
                }
            }
            RoleProfile::Recruiter(profile) => {
                if let Some(company_name) = update.company_name {
                    profile.company_name = company_name;
                }
                if let Some(designation) = update.designation {
                    profile.designation = designation;
                }
            }
        }

        match self.store.update_user(user) {
            Ok(updated) => Ok(updated),
            Err(RepositoryError::NotFound) => Err(PlacementError::NotFound("user")),
            Err(other) => Err(PlacementError::Store(other)),
        }
    }
}
