//! RBAC helpers for role-based route guarding.

use staybook_core::error::AppError;
use staybook_entity::user::UserRole;

use crate::extractors::AuthUser;

/// Checks that the authenticated user has the Admin role.
pub fn require_admin(auth: &AuthUser) -> Result<(), AppError> {
    if auth.role != UserRole::Admin {
        return Err(AppError::forbidden("관리자 권한이 필요합니다"));
    }
    Ok(())
}

/// Checks that the authenticated user is a business owner or an admin.
pub fn require_business(auth: &AuthUser) -> Result<(), AppError> {
    match auth.role {
        UserRole::Admin | UserRole::Business => Ok(()),
        UserRole::User => Err(AppError::forbidden("사업자 권한이 필요합니다")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use staybook_service::RequestContext;
    use uuid::Uuid;

    fn auth(role: UserRole) -> AuthUser {
        AuthUser(RequestContext::new(Uuid::new_v4(), "a@b.kr".into(), role))
    }

    #[test]
    fn test_role_guards() {
        assert!(require_admin(&auth(UserRole::Admin)).is_ok());
        assert!(require_admin(&auth(UserRole::Business)).is_err());
        assert!(require_business(&auth(UserRole::Business)).is_ok());
        assert!(require_business(&auth(UserRole::Admin)).is_ok());
        assert!(require_business(&auth(UserRole::User)).is_err());
    }
}
