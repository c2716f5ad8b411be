//! Outbound share-link construction
//!
//! Builds the links the app hands to the platform share sheet: the custom
//! scheme opens the app directly, the web URL is the fallback for devices
//! without the app installed. The formats here must stay byte-identical to
//! what the link extractor recognizes.

/// Custom-scheme deep link for a user profile.
pub fn user_deep_link(user_id: &str) -> String {
    format!("usersmgmt://user/{}", user_id)
}

/// Web fallback URL for a user profile.
pub fn user_web_link(user_id: &str) -> String {
    format!("https://usersmanagement.app/user/{}", user_id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Deep,
    Web,
}

/// Shareable profile link of the requested kind.
pub fn user_profile_link(user_id: &str, kind: LinkKind) -> String {
    match kind {
        LinkKind::Deep => user_deep_link(user_id),
        LinkKind::Web => user_web_link(user_id),
    }
}

/// Full share-sheet message: app link, web fallback, and the raw id.
pub fn share_message(user_id: &str, user_name: &str) -> String {
    format!(
        "Check out {}'s profile!\n\n\
         To open in the Users Management app:\n{}\n\n\
         Or view online:\n{}\n\n\
         User ID: {}",
        user_name,
        user_deep_link(user_id),
        user_web_link(user_id),
        user_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deeplink::extract;

    #[test]
    fn test_link_formats_verbatim() {
        assert_eq!(user_deep_link("42"), "usersmgmt://user/42");
        assert_eq!(user_web_link("42"), "https://usersmanagement.app/user/42");
        assert_eq!(user_profile_link("42", LinkKind::Deep), "usersmgmt://user/42");
        assert_eq!(
            user_profile_link("42", LinkKind::Web),
            "https://usersmanagement.app/user/42"
        );
    }

    #[test]
    fn test_outbound_links_round_trip_through_extractor() {
        for link in [user_deep_link("123"), user_web_link("123")] {
            let intent = extract(&link).expect("own share link must be recognized");
            assert_eq!(intent.target_user_id, "123");
        }
    }

    #[test]
    fn test_share_message_mentions_both_links() {
        let message = share_message("5", "Jane");
        assert!(message.contains("Jane"));
        assert!(message.contains("usersmgmt://user/5"));
        assert!(message.contains("https://usersmanagement.app/user/5"));
        assert!(message.contains("User ID: 5"));
    }
}
