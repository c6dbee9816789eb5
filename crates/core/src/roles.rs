//! Well-known role name constants.
//!
//! Roles are free text in the `users.role` column; only `admin` carries
//! meaning, and it is compared case-insensitively.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Whether a stored role string grants admin privileges.
pub fn is_admin_role(role: &str) -> bool {
    role.eq_ignore_ascii_case(ROLE_ADMIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_role_is_case_insensitive() {
        assert!(is_admin_role("admin"));
        assert!(is_admin_role("ADMIN"));
        assert!(is_admin_role("Admin"));
    }

    #[test]
    fn other_roles_are_not_admin() {
        assert!(!is_admin_role(ROLE_USER));
        assert!(!is_admin_role("administrator"));
        assert!(!is_admin_role(""));
    }
}
