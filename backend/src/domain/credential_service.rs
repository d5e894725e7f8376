use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::users::{AssignRoleCommand, RegisterUserCommand};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Role, User};
use crate::domain::password::{hash_password, verify_password};
use crate::storage::RecordStore;

/// Service owning the user accounts collection
#[derive(Clone)]
pub struct CredentialService {
    users: Arc<dyn RecordStore<User>>,
}

impl CredentialService {
    pub fn new(users: Arc<dyn RecordStore<User>>) -> Self {
        Self { users }
    }

    /// Make sure the users collection exists; safe on every start
    pub async fn initialize(&self) -> DomainResult<()> {
        self.users.initialize().await?;
        Ok(())
    }

    /// Register a new account with role `user`
    pub async fn register(&self, command: RegisterUserCommand) -> DomainResult<User> {
        let user_id = command.user_id.trim();
        let email = command.email.trim();
        info!("Registering user: {}", user_id);

        if user_id.is_empty() {
            return Err(DomainError::InvalidInput("User ID is required.".to_string()));
        }

        if self.find_user(user_id).await?.is_some() {
            warn!("Registration rejected, user ID already exists: {}", user_id);
            return Err(DomainError::AlreadyExists);
        }

        let user = User {
            id: user_id.to_string(),
            email: email.to_string(),
            password_hash: hash_password(&command.password),
            gender: command.gender,
            role: Role::User,
        };
        self.users.append(&user).await?;

        info!("Registered user: {}", user.id);
        Ok(user)
    }

    /// True iff `user_id` exists and `password` hashes to its stored digest
    pub async fn validate_login(&self, user_id: &str, password: &str) -> DomainResult<bool> {
        let valid = match self.find_user(user_id).await? {
            Some(user) => verify_password(password, &user.password_hash),
            None => false,
        };

        if !valid {
            info!("Login validation failed for user: {}", user_id);
        }
        Ok(valid)
    }

    pub async fn get_role(&self, user_id: &str) -> DomainResult<Role> {
        self.find_user(user_id)
            .await?
            .map(|user| user.role)
            .ok_or_else(|| DomainError::NotFound(format!("User {}", user_id)))
    }

    /// Replace the stored role of one account
    ///
    /// Malformed input is rejected before anything is read; an unknown user is
    /// reported without rewriting the collection.
    pub async fn set_role(&self, command: AssignRoleCommand) -> DomainResult<Role> {
        let user_id = command.user_id.as_deref().map(str::trim).unwrap_or_default();
        let new_role = command
            .role
            .as_deref()
            .map(str::trim)
            .and_then(|role| role.parse::<Role>().ok());

        let new_role = match (user_id.is_empty(), new_role) {
            (false, Some(role)) => role,
            _ => {
                warn!(
                    "Rejected role assignment: user_id={:?}, role={:?}",
                    command.user_id, command.role
                );
                return Err(DomainError::InvalidInput("Invalid input".to_string()));
            }
        };

        if self.find_user(user_id).await?.is_none() {
            return Err(DomainError::NotFound(format!("User {}", user_id)));
        }

        let target = user_id.to_string();
        self.users
            .update_matching(&move |user: &mut User| {
                if user.id == target {
                    user.role = new_role;
                    true
                } else {
                    false
                }
            })
            .await?;

        info!("Updated role of user {} to {}", user_id, new_role);
        Ok(new_role)
    }

    /// All accounts in registration order
    pub async fn list_users(&self) -> DomainResult<Vec<User>> {
        Ok(self.users.read_all().await?)
    }

    async fn find_user(&self, user_id: &str) -> DomainResult<Option<User>> {
        let users = self.users.read_all().await?;
        Ok(users.into_iter().find(|user| user.id == user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryRecordStore;

    fn setup_test() -> (CredentialService, MemoryRecordStore<User>) {
        let store = MemoryRecordStore::new();
        let service = CredentialService::new(Arc::new(store.clone()));
        (service, store)
    }

    fn register_command(user_id: &str, password: &str) -> RegisterUserCommand {
        RegisterUserCommand {
            user_id: user_id.to_string(),
            email: format!("{}@example.com", user_id.trim()),
            password: password.to_string(),
            gender: "F".to_string(),
        }
    }

    fn assign(user_id: Option<&str>, role: Option<&str>) -> AssignRoleCommand {
        AssignRoleCommand {
            user_id: user_id.map(str::to_string),
            role: role.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_register_creates_user_role() {
        let (service, store) = setup_test();

        let user = service.register(register_command("p1", "pw1")).await.unwrap();

        assert_eq!(user.id, "p1");
        assert_eq!(user.role, Role::User);
        assert_eq!(user.password_hash, hash_password("pw1"));
        assert_ne!(user.password_hash, "pw1");
        assert_eq!(store.snapshot(), vec![user]);
    }

    #[tokio::test]
    async fn test_register_duplicate_is_rejected() {
        let (service, store) = setup_test();

        service.register(register_command("p1", "pw1")).await.unwrap();
        let second = service.register(register_command("p1", "other")).await;

        assert!(matches!(second, Err(DomainError::AlreadyExists)));
        assert_eq!(store.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn test_register_trims_identifier() {
        let (service, store) = setup_test();

        service.register(register_command("  p1 ", "pw1")).await.unwrap();
        let duplicate = service.register(register_command("p1", "pw1")).await;

        assert!(matches!(duplicate, Err(DomainError::AlreadyExists)));
        assert_eq!(store.snapshot()[0].id, "p1");
        assert_eq!(store.snapshot()[0].email, "p1@example.com");
    }

    #[tokio::test]
    async fn test_register_requires_identifier() {
        let (service, store) = setup_test();

        let result = service.register(register_command("   ", "pw1")).await;

        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_validate_login() {
        let (service, _store) = setup_test();
        service.register(register_command("p1", "pw1")).await.unwrap();

        assert!(service.validate_login("p1", "pw1").await.unwrap());
        assert!(!service.validate_login("p1", "pw2").await.unwrap());
        assert!(!service.validate_login("p1", "").await.unwrap());
        assert!(!service.validate_login("nobody", "pw1").await.unwrap());
    }

    #[tokio::test]
    async fn test_validate_login_matches_stored_hash_only() {
        let store = MemoryRecordStore::with_records(vec![User {
            id: "legacy".to_string(),
            email: "legacy@example.com".to_string(),
            password_hash: hash_password("secret"),
            gender: "M".to_string(),
            role: Role::User,
        }]);
        let service = CredentialService::new(Arc::new(store));

        let stored_digest = hash_password("secret");
        for candidate in ["secret", "Secret", "secret ", "s", stored_digest.as_str()] {
            let expected = hash_password(candidate) == hash_password("secret");
            assert_eq!(
                service.validate_login("legacy", candidate).await.unwrap(),
                expected,
                "candidate {:?}",
                candidate
            );
        }
    }

    #[tokio::test]
    async fn test_get_role() {
        let (service, _store) = setup_test();
        service.register(register_command("p1", "pw1")).await.unwrap();

        assert_eq!(service.get_role("p1").await.unwrap(), Role::User);
        assert!(matches!(
            service.get_role("ghost").await,
            Err(DomainError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_set_role_updates_only_target() {
        let (service, store) = setup_test();
        service.register(register_command("a", "pw")).await.unwrap();
        service.register(register_command("b", "pw")).await.unwrap();
        service.register(register_command("c", "pw")).await.unwrap();

        let role = service.set_role(assign(Some("b"), Some("admin"))).await.unwrap();
        assert_eq!(role, Role::Admin);

        let users = store.snapshot();
        let ids: Vec<&str> = users.iter().map(|u| u.id.as_str()).collect();
        let roles: Vec<Role> = users.iter().map(|u| u.role).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(roles, vec![Role::User, Role::Admin, Role::User]);

        service.set_role(assign(Some("b"), Some("user"))).await.unwrap();
        assert_eq!(service.get_role("b").await.unwrap(), Role::User);
    }

    #[tokio::test]
    async fn test_set_role_rejects_invalid_input() {
        let (service, store) = setup_test();
        service.register(register_command("a", "pw")).await.unwrap();
        let before = store.snapshot();

        for command in [
            assign(Some("a"), Some("superuser")),
            assign(Some("a"), Some("ADMIN")),
            assign(Some("a"), None),
            assign(None, Some("admin")),
            assign(Some(""), Some("admin")),
        ] {
            let result = service.set_role(command).await;
            assert!(matches!(result, Err(DomainError::InvalidInput(_))));
        }

        assert_eq!(store.snapshot(), before);
    }

    #[tokio::test]
    async fn test_set_role_unknown_user() {
        let (service, store) = setup_test();
        service.register(register_command("a", "pw")).await.unwrap();

        let result = service.set_role(assign(Some("ghost"), Some("admin"))).await;

        assert!(matches!(result, Err(DomainError::NotFound(_))));
        assert_eq!(store.snapshot()[0].role, Role::User);
    }

    #[tokio::test]
    async fn test_csv_file_layout_after_role_change() {
        use crate::storage::csv::test_utils::TestEnvironment;
        use crate::storage::CsvRecordStore;

        let env = TestEnvironment::new().await.unwrap();
        let service = CredentialService::new(Arc::new(CsvRecordStore::<User>::new(
            env.connection.clone(),
        )));
        service.initialize().await.unwrap();
        service.register(register_command("a", "pw")).await.unwrap();
        service.register(register_command("b", "pw")).await.unwrap();

        service.set_role(assign(Some("b"), Some("admin"))).await.unwrap();

        let digest = hash_password("pw");
        assert_eq!(
            env.read_file("users.csv"),
            format!(
                "ID,Email,PasswordHash,Gender,Role\n\
                 a,a@example.com,{digest},F,user\n\
                 b,b@example.com,{digest},F,admin\n"
            )
        );
    }

    #[tokio::test]
    async fn test_unreadable_row_does_not_block_other_logins() {
        use crate::storage::csv::test_utils::TestEnvironment;
        use crate::storage::CsvRecordStore;

        let env = TestEnvironment::new().await.unwrap();
        let digest = hash_password("pw");
        std::fs::write(
            env.base_directory().join("users.csv"),
            format!(
                "ID,Email,PasswordHash,Gender,Role\n\
                 odd,odd@example.com,{digest},M,superuser\n\
                 a,a@example.com,{digest},F,user\n"
            ),
        )
        .unwrap();
        let service = CredentialService::new(Arc::new(CsvRecordStore::<User>::new(
            env.connection.clone(),
        )));

        assert!(service.validate_login("a", "pw").await.unwrap());
        assert_eq!(service.list_users().await.unwrap().len(), 1);

        // A role change would rewrite the file, so it refuses rather than drop the row
        let result = service.set_role(assign(Some("a"), Some("admin"))).await;
        assert!(matches!(result, Err(DomainError::Storage(_))));
        assert!(env.read_file("users.csv").contains("superuser"));
    }

    #[tokio::test]
    async fn test_initialize_marks_store() {
        let (service, store) = setup_test();
        service.initialize().await.unwrap();
        assert!(store.is_initialized());
    }
}
