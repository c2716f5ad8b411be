//! User directory with an invalidating cache
//!
//! Wraps the API client with a per-query list cache and a per-id record
//! cache. Mutations invalidate the list cache wholesale and write the
//! fresh record through to the id cache; nothing fancier by design, and
//! nothing is persisted.

use std::collections::HashMap;
use std::sync::Mutex;

use log::debug;

use crate::api::{build_users_query, ApiClient, ApiError, GetUsersParams, NewUser, User};

#[derive(Default)]
struct DirectoryCache {
    lists: HashMap<String, Vec<User>>,
    records: HashMap<String, User>,
}

impl DirectoryCache {
    fn list(&self, key: &str) -> Option<Vec<User>> {
        self.lists.get(key).cloned()
    }

    fn store_list(&mut self, key: String, users: &[User]) {
        self.lists.insert(key, users.to_vec());
        for user in users {
            self.records.insert(user.id.clone(), user.clone());
        }
    }

    fn record(&self, id: &str) -> Option<User> {
        self.records.get(id).cloned()
    }

    fn store_record(&mut self, user: &User) {
        self.records.insert(user.id.clone(), user.clone());
    }

    fn invalidate_lists(&mut self) {
        self.lists.clear();
    }

    fn remove_record(&mut self, id: &str) {
        self.records.remove(id);
    }
}

/// Cached view over the remote user directory.
pub struct UserDirectory {
    api: ApiClient,
    cache: Mutex<DirectoryCache>,
}

impl UserDirectory {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            cache: Mutex::new(DirectoryCache::default()),
        }
    }

    /// Fetch a page of users, served from cache when the same query was
    /// already answered this session.
    pub async fn list(&self, params: &GetUsersParams) -> Result<Vec<User>, ApiError> {
        let key = build_users_query(params);
        if let Some(users) = self.cache.lock().unwrap().list(&key) {
            debug!("[Users] Cache hit for {}", key);
            return Ok(users);
        }
        let users = self.api.get_users(params).await?;
        self.cache.lock().unwrap().store_list(key, &users);
        Ok(users)
    }

    pub async fn get(&self, id: &str) -> Result<User, ApiError> {
        if let Some(user) = self.cache.lock().unwrap().record(id) {
            debug!("[Users] Cache hit for user {}", id);
            return Ok(user);
        }
        let user = self.api.get_user(id).await?;
        self.cache.lock().unwrap().store_record(&user);
        Ok(user)
    }

    pub async fn create(&self, data: &NewUser) -> Result<User, ApiError> {
        let user = self.api.create_user(data).await?;
        let mut cache = self.cache.lock().unwrap();
        cache.invalidate_lists();
        cache.store_record(&user);
        Ok(user)
    }

    pub async fn update(&self, id: &str, data: &NewUser) -> Result<User, ApiError> {
        let user = self.api.update_user(id, data).await?;
        let mut cache = self.cache.lock().unwrap();
        cache.invalidate_lists();
        cache.store_record(&user);
        Ok(user)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.api.delete_user(id).await?;
        let mut cache = self.cache.lock().unwrap();
        cache.invalidate_lists();
        cache.remove_record(id);
        Ok(())
    }

    /// Drop everything cached; the next reads go back to the API.
    pub fn invalidate(&self) {
        let mut cache = self.cache.lock().unwrap();
        cache.lists.clear();
        cache.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, username: &str) -> User {
        User {
            id: id.to_string(),
            username: username.to_string(),
            firstname: "Test".to_string(),
            lastname: "User".to_string(),
            email: format!("{}@example.com", username),
            avatar: None,
            city: String::new(),
            phone: String::new(),
            birthdate: String::new(),
        }
    }

    #[test]
    fn test_list_cache_stores_and_serves() {
        let mut cache = DirectoryCache::default();
        let users = vec![user("1", "a"), user("2", "b")];
        cache.store_list("?page=1&limit=10".to_string(), &users);

        assert_eq!(cache.list("?page=1&limit=10").unwrap(), users);
        assert!(cache.list("?page=2&limit=10").is_none());
        // Listed users are also visible by id
        assert_eq!(cache.record("2").unwrap().username, "b");
    }

    #[test]
    fn test_invalidate_lists_keeps_records() {
        let mut cache = DirectoryCache::default();
        cache.store_list("?page=1&limit=10".to_string(), &[user("1", "a")]);
        cache.invalidate_lists();

        assert!(cache.list("?page=1&limit=10").is_none());
        assert!(cache.record("1").is_some());
    }

    #[test]
    fn test_write_through_record() {
        let mut cache = DirectoryCache::default();
        cache.store_record(&user("5", "old"));
        cache.store_record(&user("5", "new"));
        assert_eq!(cache.record("5").unwrap().username, "new");

        cache.remove_record("5");
        assert!(cache.record("5").is_none());
    }
}
