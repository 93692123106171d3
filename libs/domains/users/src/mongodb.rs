//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use mongodb::{Collection, Database, IndexModel, bson::doc, options::IndexOptions};
use tracing::instrument;

use crate::error::{UserError, UserResult, duplicate_key_message};
use crate::models::{Role, User};
use crate::repository::UserRepository;

pub const DEFAULT_COLLECTION: &str = "users";

pub const USERNAME_UNIQUE: &str = "idx_username_unique";
pub const EMAIL_UNIQUE: &str = "idx_email_unique";
pub const ROLE: &str = "idx_role";

pub fn user_indexes() -> Vec<IndexModel> {
    let unique = |name: &str| {
        IndexOptions::builder()
            .unique(true)
            .name(name.to_string())
            .build()
    };

    vec![
        IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(unique(USERNAME_UNIQUE))
            .build(),
        IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(unique(EMAIL_UNIQUE))
            .build(),
        IndexModel::builder()
            .keys(doc! { "role": 1 })
            .options(IndexOptions::builder().name(ROLE.to_string()).build())
            .build(),
    ]
}

#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<User>(collection_name),
        }
    }

    pub async fn init_indexes(&self) -> UserResult<()> {
        self.collection
            .create_indexes(user_indexes())
            .await
            .map_err(|e| UserError::Internal(format!("failed to build user indexes: {e}")))?;
        tracing::info!(collection = %self.collection.name(), "User indexes created successfully");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create(&self, mut user: User) -> UserResult<User> {
        match self.collection.insert_one(&user).await {
            Ok(result) => {
                user.id = result.inserted_id.as_object_id();
                Ok(user)
            }
            Err(e) => match duplicate_key_message(&e) {
                Some(msg) if msg.contains(EMAIL_UNIQUE) => Err(UserError::DuplicateEmail(user.email)),
                Some(_) => Err(UserError::DuplicateUsername(user.username)),
                None => Err(e.into()),
            },
        }
    }

    #[instrument(skip(self))]
    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>> {
        Ok(self
            .collection
            .find_one(doc! { "username": username })
            .await?)
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> UserResult<bool> {
        let count = self
            .collection
            .count_documents(doc! { "email": email })
            .limit(1)
            .await?;
        Ok(count > 0)
    }

    #[instrument(skip(self))]
    async fn admin_exists(&self) -> UserResult<bool> {
        let count = self
            .collection
            .count_documents(doc! { "role": Role::Admin.to_string() })
            .limit(1)
            .await?;
        Ok(count > 0)
    }
}
