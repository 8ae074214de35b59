use serde::{Deserialize, Serialize};

/// User as reported by the identity provider. Any field may be absent.
///
/// 身份提供方返回的原始用户信息，任意字段都可能缺失。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityUser {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "photoURL")]
    pub photo_url: Option<String>,
}

/// Normalized signed-in user; absent provider fields become empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionUser {
    pub name: String,
    pub email: String,
    pub image: String,
}

impl From<&IdentityUser> for SessionUser {
    fn from(user: &IdentityUser) -> Self {
        Self {
            name: user.display_name.clone().unwrap_or_default(),
            email: user.email.clone().unwrap_or_default(),
            image: user.photo_url.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: SessionUser,
}

impl Session {
    pub fn from_identity(user: &IdentityUser) -> Self {
        Self { user: user.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_fields_normalize_to_empty_strings() {
        let user: IdentityUser = serde_json::from_value(json!({
            "displayName": null,
            "email": null,
            "photoURL": null
        }))
        .unwrap();

        let session = Session::from_identity(&user);

        assert_eq!(
            serde_json::to_value(&session).unwrap(),
            json!({ "user": { "name": "", "email": "", "image": "" } })
        );
    }

    #[test]
    fn test_present_fields_are_kept() {
        let user = IdentityUser {
            display_name: Some("John Doe".into()),
            email: Some("john@example.com".into()),
            photo_url: Some("https://example.com/avatar.jpg".into()),
        };

        let session_user = SessionUser::from(&user);

        assert_eq!(session_user.name, "John Doe");
        assert_eq!(session_user.email, "john@example.com");
        assert_eq!(session_user.image, "https://example.com/avatar.jpg");
    }
}
