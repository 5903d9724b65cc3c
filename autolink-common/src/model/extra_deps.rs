// autolink-common/src/model/extra_deps.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AndroidMavenRepositoryCredentials {
    #[serde(rename_all = "camelCase")]
    Password { username: String, password: String },
    #[serde(rename_all = "camelCase")]
    HttpHeader { name: String, value: String },
    #[serde(rename_all = "camelCase")]
    Aws {
        access_key: String,
        secret_key: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        session_token: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MavenAuthentication {
    Basic,
    Digest,
    Header,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AndroidMavenRepository {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<AndroidMavenRepositoryCredentials>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<MavenAuthentication>,
}

/// A repository entry as written in `gradle.properties`: a bare URL or a full object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawMavenRepository {
    Url(String),
    Full(AndroidMavenRepository),
}

impl From<RawMavenRepository> for AndroidMavenRepository {
    fn from(raw: RawMavenRepository) -> Self {
        match raw {
            RawMavenRepository::Url(url) => Self {
                url,
                credentials: None,
                authentication: None,
            },
            RawMavenRepository::Full(repo) => repo,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplePod {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configurations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modular_headers: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub podspec: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testspecs: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

/// Extra build dependencies for one platform family. Never a mix of both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExtraDependencies {
    Android(Vec<AndroidMavenRepository>),
    Apple(Vec<ApplePod>),
}

impl ExtraDependencies {
    pub fn len(&self) -> usize {
        match self {
            Self::Android(repos) => repos.len(),
            Self::Apple(pods) => pods.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_shapes_are_distinguished() {
        let repos: Vec<AndroidMavenRepository> = serde_json::from_str(
            r#"[
                { "url": "https://a", "credentials": { "username": "u", "password": "p" } },
                { "url": "https://b", "credentials": { "name": "X-Token", "value": "t" }, "authentication": "header" },
                { "url": "https://c", "credentials": { "accessKey": "a", "secretKey": "s" } }
            ]"#,
        )
        .unwrap();
        assert!(matches!(
            repos[0].credentials,
            Some(AndroidMavenRepositoryCredentials::Password { .. })
        ));
        assert!(matches!(
            repos[1].credentials,
            Some(AndroidMavenRepositoryCredentials::HttpHeader { .. })
        ));
        assert_eq!(repos[1].authentication, Some(MavenAuthentication::Header));
        assert!(matches!(
            repos[2].credentials,
            Some(AndroidMavenRepositoryCredentials::Aws { session_token: None, .. })
        ));
    }

    #[test]
    fn bare_url_is_shorthand_for_repository() {
        let raw: Vec<RawMavenRepository> =
            serde_json::from_str(r#"["https://maven.example.com"]"#).unwrap();
        let repo: AndroidMavenRepository = raw.into_iter().next().unwrap().into();
        assert_eq!(repo.url, "https://maven.example.com");
        assert!(repo.credentials.is_none());
    }
}
