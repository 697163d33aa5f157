use serde::{Deserialize, Serialize};

/// A package as reported by a registry search, normalized for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageRecord {
    pub name: String,
    pub version: String,
    pub info: Option<String>,
    /// Falls back to the npm package page when no homepage is published.
    pub homepage_uri: Option<String>,
    pub source_code_uri: Option<String>,
    pub package_uri: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub objects: Vec<SearchObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchObject {
    pub package: RegistryPackage,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RegistryPackage {
    name: Option<String>,
    version: Option<String>,
    description: Option<String>,
    links: Option<PackageLinks>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PackageLinks {
    homepage: Option<String>,
    repository: Option<String>,
    npm: Option<String>,
}

impl From<RegistryPackage> for PackageRecord {
    fn from(package: RegistryPackage) -> Self {
        let links = package.links.unwrap_or_default();
        let homepage_uri = links
            .homepage
            .filter(|homepage| !homepage.is_empty())
            .or_else(|| links.npm.clone());

        PackageRecord {
            name: package.name.unwrap_or_default(),
            version: package.version.unwrap_or_default(),
            info: package.description,
            homepage_uri,
            source_code_uri: links.repository,
            package_uri: links.npm,
        }
    }
}

impl SearchResponse {
    pub(crate) fn into_records(self) -> Vec<PackageRecord> {
        self.objects
            .into_iter()
            .map(|object| PackageRecord::from(object.package))
            .collect()
    }
}
