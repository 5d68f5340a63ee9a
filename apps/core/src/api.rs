use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::ServerRoot;
use crate::error::{FetchError, RouteError};
use crate::model::{Analysis, Farm, FarmSummary, Resource, Scan, Zone};
use crate::source::LocalDataSource;

/// One navigable resource of the dashboard API
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Route {
    Farms,
    Farm {
        farm: String,
    },
    Zone {
        farm: String,
        zone: String,
    },
    Scan {
        farm: String,
        zone: String,
        scan: String,
    },
    Analysis {
        farm: String,
        zone: String,
        analysis: String,
    },
}

impl Route {
    /// Path relative to the server root
    pub fn path(&self) -> String {
        match self {
            Self::Farms => "farms".to_string(),
            Self::Farm { farm } => format!("farms/{farm}"),
            Self::Zone { farm, zone } => format!("farms/{farm}/zones/{zone}"),
            Self::Scan { farm, zone, scan } => format!("farms/{farm}/zones/{zone}/scans/{scan}"),
            Self::Analysis {
                farm,
                zone,
                analysis,
            } => format!("farms/{farm}/zones/{zone}/analyses/{analysis}"),
        }
    }

    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let trimmed = path.trim().trim_matches('/');
        let segments: Vec<&str> = trimmed.split('/').collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(RouteError::Unknown(path.to_string()));
        }

        match segments.as_slice() {
            ["farms"] => Ok(Self::Farms),
            ["farms", farm] => Ok(Self::Farm {
                farm: (*farm).to_string(),
            }),
            ["farms", farm, "zones", zone] => Ok(Self::Zone {
                farm: (*farm).to_string(),
                zone: (*zone).to_string(),
            }),
            ["farms", farm, "zones", zone, "scans", scan] => Ok(Self::Scan {
                farm: (*farm).to_string(),
                zone: (*zone).to_string(),
                scan: (*scan).to_string(),
            }),
            ["farms", farm, "zones", zone, "analyses", analysis] => Ok(Self::Analysis {
                farm: (*farm).to_string(),
                zone: (*zone).to_string(),
                analysis: (*analysis).to_string(),
            }),
            _ => Err(RouteError::Unknown(path.to_string())),
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Farms => "Farms",
            Self::Farm { .. } => "Farm",
            Self::Zone { .. } => "Zone",
            Self::Scan { .. } => "Scan",
            Self::Analysis { .. } => "Analysis",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Sizes the image endpoint knows how to serve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    Orig,
    Thumb,
    Large,
}

impl ImageSize {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Orig => "orig",
            Self::Thumb => "thumb",
            Self::Large => "large",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dashboard API client: a server root plus the source that performs requests
#[derive(Debug, Clone)]
pub struct ApiClient<S> {
    root: ServerRoot,
    source: S,
}

impl<S> ApiClient<S> {
    pub const fn new(root: ServerRoot, source: S) -> Self {
        Self { root, source }
    }

    pub const fn root(&self) -> &ServerRoot {
        &self.root
    }

    pub const fn source(&self) -> &S {
        &self.source
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{path}", self.root)
    }

    pub fn image_url(&self, farm: &str, zone: &str, image: &str, size: ImageSize) -> String {
        self.root.image_url(farm, zone, image, size)
    }
}

impl<S: LocalDataSource> ApiClient<S> {
    /// Issues a single GET for `path` relative to the server root
    pub async fn get(&self, path: &str) -> Result<Value, FetchError> {
        let url = self.url_for(path);
        match self.source.get_json(&url).await {
            Ok(body) => {
                tracing::debug!(%url, "request succeeded");
                Ok(body)
            }
            Err(error) => {
                tracing::warn!(%url, %error, "request failed");
                Err(error)
            }
        }
    }

    async fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let body = self.get(path).await?;
        serde_json::from_value(body).map_err(|e| FetchError::Decode {
            url: self.url_for(path),
            message: e.to_string(),
        })
    }

    pub async fn get_farms(&self) -> Result<Vec<FarmSummary>, FetchError> {
        self.get_as(&Route::Farms.path()).await
    }

    pub async fn get_farm(&self, farm: &str) -> Result<Farm, FetchError> {
        let route = Route::Farm {
            farm: farm.to_string(),
        };
        self.get_as(&route.path()).await
    }

    pub async fn get_zone(&self, farm: &str, zone: &str) -> Result<Zone, FetchError> {
        let route = Route::Zone {
            farm: farm.to_string(),
            zone: zone.to_string(),
        };
        self.get_as(&route.path()).await
    }

    pub async fn get_scan(&self, farm: &str, zone: &str, scan: &str) -> Result<Scan, FetchError> {
        let route = Route::Scan {
            farm: farm.to_string(),
            zone: zone.to_string(),
            scan: scan.to_string(),
        };
        self.get_as(&route.path()).await
    }

    pub async fn get_analysis(
        &self,
        farm: &str,
        zone: &str,
        analysis: &str,
    ) -> Result<Analysis, FetchError> {
        let route = Route::Analysis {
            farm: farm.to_string(),
            zone: zone.to_string(),
            analysis: analysis.to_string(),
        };
        let mut record: Analysis = self.get_as(&route.path()).await?;
        record.farm.get_or_insert_with(|| farm.to_string());
        record.zone.get_or_insert_with(|| zone.to_string());
        Ok(record)
    }

    pub async fn fetch(&self, route: &Route) -> Result<Resource, FetchError> {
        match route {
            Route::Farms => self.get_farms().await.map(Resource::Farms),
            Route::Farm { farm } => self.get_farm(farm).await.map(Resource::Farm),
            Route::Zone { farm, zone } => self.get_zone(farm, zone).await.map(Resource::Zone),
            Route::Scan { farm, zone, scan } => {
                self.get_scan(farm, zone, scan).await.map(Resource::Scan)
            }
            Route::Analysis {
                farm,
                zone,
                analysis,
            } => self
                .get_analysis(farm, zone, analysis)
                .await
                .map(Resource::Analysis),
        }
    }
}
