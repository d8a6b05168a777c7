use crate::license_report::domain::License;
use crate::ports::outbound::LicenseClassifier;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;

const GITHUB_API_BASE: &str = "https://api.github.com/";

/// SPDX placeholder GitHub reports for licenses it cannot name
const SPDX_NOASSERTION: &str = "NOASSERTION";

/// GitHub OAuth application credentials used to raise the API rate limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubCredentials {
    client_id: String,
    client_secret: String,
}

impl GitHubCredentials {
    /// Environment variable holding `client_id=...&client_secret=...`
    pub const ENV_VAR: &'static str = "PACKAGE_LICENSES_GITHUB_QUERY";

    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Parses a `client_id=<id>&client_secret=<secret>` query string
    ///
    /// Values may be percent-encoded. Returns `None` when either marker is
    /// missing or the id is empty.
    pub fn parse(query: &str) -> Option<Self> {
        const ID_MARKER: &str = "client_id=";
        const SECRET_MARKER: &str = "&client_secret=";

        let start = query.find(ID_MARKER)? + ID_MARKER.len();
        let rest = &query[start..];
        let separator = rest.find(SECRET_MARKER)?;
        let client_id = decode(&rest[..separator]);
        let client_secret = decode(rest[separator + SECRET_MARKER.len()..].trim_end());

        (!client_id.is_empty()).then(|| Self::new(client_id, client_secret))
    }

    /// Reads [`GitHubCredentials::ENV_VAR`]; absent or malformed means unauthenticated
    pub fn from_environment() -> Option<Self> {
        std::env::var(Self::ENV_VAR)
            .ok()
            .filter(|query| !query.trim().is_empty())
            .and_then(|query| Self::parse(&query))
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

fn decode(value: &str) -> String {
    urlencoding::decode(value)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| value.to_string())
}

/// GitHub API lookup a URL maps to
#[derive(Debug, Clone, PartialEq, Eq)]
enum LicenseQuery {
    /// License file detected in a repository
    Repository { owner: String, repo: String },
    /// Canonical license by GitHub license key
    Canonical { key: String },
}

#[derive(Debug, Deserialize)]
struct LicenseSummary {
    key: String,
    name: String,
    #[serde(default)]
    spdx_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RepositoryLicense {
    #[serde(default)]
    download_url: Option<String>,
    license: LicenseSummary,
}

#[derive(Debug, Deserialize)]
struct LicenseDetail {
    key: String,
    name: String,
    #[serde(default)]
    spdx_id: Option<String>,
    #[serde(default)]
    html_url: Option<String>,
    #[serde(default)]
    body: String,
}

/// GitHubLicenseClassifier adapter resolving licenses through the GitHub license API
///
/// - `https://github.com/<owner>/<repo>...` uses the repository's detected
///   license file; the result is a snapshot sourced from that file.
/// - Well-known license pages (opensource.org, choosealicense.com,
///   licenses.nuget.org, apache.org, gnu.org) map to a canonical license,
///   returned as a master license with its template text.
/// - Any other URL is unresolved without a request.
pub struct GitHubLicenseClassifier {
    client: reqwest::Client,
    api_base: Url,
    credentials: Option<GitHubCredentials>,
}

impl GitHubLicenseClassifier {
    /// Creates a classifier; `credentials` are sent as HTTP basic auth
    pub fn new(credentials: Option<GitHubCredentials>) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("package-licenses/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_base: Url::parse(GITHUB_API_BASE)?,
            credentials,
        })
    }

    /// Maps a URL to its GitHub lookup, if it has one
    fn route(url: &Url) -> Option<LicenseQuery> {
        let host = url.host_str()?.to_ascii_lowercase();
        let host = host.strip_prefix("www.").unwrap_or(&host);
        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        match (host, segments.as_slice()) {
            ("github.com", [owner, repo, ..]) => {
                let repo = repo.strip_suffix(".git").unwrap_or(repo);
                (is_safe_component(owner) && is_safe_component(repo)).then(|| {
                    LicenseQuery::Repository {
                        owner: owner.to_string(),
                        repo: repo.to_string(),
                    }
                })
            }
            ("opensource.org", ["licenses" | "license", page, ..]) => {
                canonical(&osi_license_key(strip_page_extension(page)))
            }
            ("choosealicense.com", ["licenses", id, ..])
            | ("licenses.nuget.org", [id]) => canonical(strip_page_extension(id)),
            ("apache.org", ["licenses", page]) if page.starts_with("LICENSE-2.0") => {
                canonical("apache-2.0")
            }
            ("gnu.org", ["licenses", page] | ["licenses", "old-licenses", page]) => {
                canonical(gnu_license_key(strip_page_extension(page))?)
            }
            _ => None,
        }
    }

    async fn get(&self, url: Url, authenticated: bool) -> Result<Option<reqwest::Response>> {
        let mut request = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/vnd.github+json");
        if let (true, Some(credentials)) = (authenticated, &self.credentials) {
            request = request.basic_auth(credentials.client_id(), Some(credentials.client_secret()));
        }

        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            anyhow::bail!("GitHub returned status code {} for {}", status, url);
        }
        Ok(Some(response))
    }

    async fn repository_license(&self, owner: &str, repo: &str) -> Result<Option<License>> {
        let endpoint = self
            .api_base
            .join(&format!("repos/{}/{}/license", owner, repo))?;
        let Some(response) = self.get(endpoint, true).await? else {
            return Ok(None);
        };
        let found: RepositoryLicense = response.json().await?;

        let mut license = License::new(
            license_id(&found.license.key, found.license.spdx_id.as_deref()),
            found.license.name,
        );
        if let Some(download_url) = found.download_url.as_deref() {
            let source = Url::parse(download_url)?;
            if let Some(response) = self.get(source.clone(), false).await? {
                license = license.with_text(response.text().await?);
            }
            license = license.with_source(source);
        }
        Ok(Some(license))
    }

    async fn canonical_license(&self, key: &str) -> Result<Option<License>> {
        let endpoint = self.api_base.join(&format!("licenses/{}", key))?;
        let Some(response) = self.get(endpoint, true).await? else {
            return Ok(None);
        };
        let detail: LicenseDetail = response.json().await?;

        let mut license = License::new(
            license_id(&detail.key, detail.spdx_id.as_deref()),
            detail.name,
        )
        .with_text(detail.body)
        .as_master();
        if let Some(source) = detail.html_url.as_deref().and_then(|u| Url::parse(u).ok()) {
            license = license.with_source(source);
        }
        Ok(Some(license))
    }
}

#[async_trait]
impl LicenseClassifier for GitHubLicenseClassifier {
    async fn classify(&self, url: &Url) -> Result<Option<License>> {
        match Self::route(url) {
            Some(LicenseQuery::Repository { owner, repo }) => {
                self.repository_license(&owner, &repo).await
            }
            Some(LicenseQuery::Canonical { key }) => self.canonical_license(&key).await,
            None => Ok(None),
        }
    }
}

/// Owner, repository, and license key characters accepted in API paths
fn is_safe_component(component: &str) -> bool {
    !component.is_empty()
        && component != "."
        && component != ".."
        && component
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

fn canonical(id: &str) -> Option<LicenseQuery> {
    is_safe_component(id).then(|| LicenseQuery::Canonical {
        key: id.to_ascii_lowercase(),
    })
}

fn strip_page_extension(page: &str) -> &str {
    [".html", ".php", ".txt", ".en.html"]
        .iter()
        .find_map(|ext| page.strip_suffix(ext))
        .unwrap_or(page)
}

/// GitHub key of an opensource.org page
///
/// Pages from before the SPDX-named URLs (`mit-license.php`, `bsd-license.php`)
/// carry names GitHub does not know.
fn osi_license_key(page: &str) -> String {
    let page = page.to_ascii_lowercase();
    let key = match page.as_str() {
        "mit-license" => "mit",
        "bsd-license" => "bsd-3-clause",
        "apache2.0" | "apache-license" => "apache-2.0",
        "gpl-license" => "gpl-2.0",
        "lgpl-license" => "lgpl-2.1",
        "zlib-license" => "zlib",
        "artistic-license-2.0" => "artistic-2.0",
        "eclipse-1.0" => "epl-1.0",
        "eclipse-2.0" => "epl-2.0",
        "mozilla2.0" => "mpl-2.0",
        other => other,
    };
    key.to_string()
}

/// GitHub key of a gnu.org license page (`gpl` is the latest version)
fn gnu_license_key(page: &str) -> Option<&str> {
    let page = page.strip_suffix(".en").unwrap_or(page);
    match page {
        "gpl" => Some("gpl-3.0"),
        "lgpl" => Some("lgpl-3.0"),
        "agpl" => Some("agpl-3.0"),
        _ if ["gpl-", "lgpl-", "agpl-"].iter().any(|p| page.starts_with(p)) => Some(page),
        _ => None,
    }
}

fn license_id(key: &str, spdx_id: Option<&str>) -> String {
    spdx_id
        .filter(|id| !id.is_empty() && *id != SPDX_NOASSERTION)
        .unwrap_or(key)
        .to_string()
}
