use sea_orm::entity::prelude::*;

/// Lifecycle state of an account.
///
/// New local accounts start as `Pending` unless their requested role is
/// auto-approved. Accounts are never hard-deleted; removal sets
/// `Deactivated` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum AccountStatus {
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Approved")]
    Approved,
    #[sea_orm(string_value = "Rejected")]
    Rejected,
    #[sea_orm(string_value = "Deactivated")]
    Deactivated,
}

/// How the account was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum SignupSource {
    #[sea_orm(string_value = "local")]
    Local,
    #[sea_orm(string_value = "google")]
    Google,
}

/// A registered account.
///
/// A user may own at most one celebrity profile; the link lives on
/// `celebrities.user_id` and is protected by a unique index there.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    /// None for accounts created through an OAuth provider.
    pub password_hash: Option<String>,
    #[sea_orm(unique)]
    pub google_id: Option<String>,
    pub display_name: Option<String>,
    pub profile_picture: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub account_status: AccountStatus,
    pub source: SignupSource,
    /// One-time password-reset credential, cleared on successful use.
    pub reset_token: Option<String>,
    pub reset_token_expires: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_role::Entity")]
    UserRole,
    #[sea_orm(has_one = "super::celebrity::Entity")]
    Celebrity,
}

impl Related<super::user_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserRole.def()
    }
}

impl Related<super::celebrity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Celebrity.def()
    }
}

// Many-to-many to roles through user_roles.
impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_role::Relation::Role.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::user_role::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whether `token` is the account's current reset token and still inside
    /// its expiry window. A token with no stored expiry never validates.
    pub fn reset_token_matches(&self, token: &str, now: DateTimeUtc) -> bool {
        match (&self.reset_token, &self.reset_token_expires) {
            (Some(stored), Some(expires)) => stored == token && *expires > now,
            _ => false,
        }
    }

    /// Whether the account is allowed to sign in at all.
    /// Pending accounts may sign in; rejected and deactivated ones may not.
    pub fn can_authenticate(&self) -> bool {
        !matches!(
            self.account_status,
            AccountStatus::Rejected | AccountStatus::Deactivated
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn user_with_token(token: Option<&str>, expires: Option<DateTimeUtc>) -> Model {
        Model {
            id: 1,
            username: "casey".to_string(),
            email: "casey@example.com".to_string(),
            password_hash: Some("hash".to_string()),
            google_id: None,
            display_name: None,
            profile_picture: None,
            first_name: None,
            last_name: None,
            phone: None,
            account_status: AccountStatus::Approved,
            source: SignupSource::Local,
            reset_token: token.map(str::to_string),
            reset_token_expires: expires,
        }
    }

    #[test]
    fn token_inside_window_matches() {
        let now = Utc::now();
        let user = user_with_token(Some("abc"), Some(now + Duration::hours(1)));
        assert!(user.reset_token_matches("abc", now));
    }

    #[test]
    fn wrong_token_never_matches() {
        let now = Utc::now();
        let user = user_with_token(Some("abc"), Some(now + Duration::hours(1)));
        assert!(!user.reset_token_matches("xyz", now));
    }

    #[test]
    fn expired_token_never_matches() {
        let now = Utc::now();
        let user = user_with_token(Some("abc"), Some(now - Duration::seconds(1)));
        assert!(!user.reset_token_matches("abc", now));
    }

    #[test]
    fn cleared_token_never_matches() {
        let now = Utc::now();
        let user = user_with_token(None, None);
        assert!(!user.reset_token_matches("abc", now));
    }

    #[test]
    fn token_without_expiry_never_matches() {
        let now = Utc::now();
        let user = user_with_token(Some("abc"), None);
        assert!(!user.reset_token_matches("abc", now));
    }

    #[test]
    fn rejected_and_deactivated_cannot_authenticate() {
        let mut user = user_with_token(None, None);
        assert!(user.can_authenticate());

        user.account_status = AccountStatus::Pending;
        assert!(user.can_authenticate());

        user.account_status = AccountStatus::Rejected;
        assert!(!user.can_authenticate());

        user.account_status = AccountStatus::Deactivated;
        assert!(!user.can_authenticate());
    }
}
