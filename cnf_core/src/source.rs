use async_trait::async_trait;
use tracing::info;

use crate::env::EnvironmentContext;
use crate::error::FetchError;

/// Raw response of a fact request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedBody {
    pub body: String,
    pub status: u16,
}

/// Something that can answer a single GET.
///
/// Implementations return whatever status the server sent; deciding that
/// only 200 is acceptable is left to [`fetch`].
#[async_trait]
pub trait FactSource: Send + Sync {
    async fn get(&self, url: &str) -> Result<FetchedBody, FetchError>;
}

/// Expand `url_template` against `env` and issue one GET through `source`.
///
/// No retries. Any status other than 200 is a [`FetchError::Status`].
pub async fn fetch<S>(
    source: &S,
    url_template: &str,
    env: &EnvironmentContext,
) -> Result<FetchedBody, FetchError>
where
    S: FactSource + ?Sized,
{
    let url = env.expand(url_template);
    info!("Fetching fact from {url}");

    let response = source.get(&url).await?;
    if response.status != 200 {
        return Err(FetchError::Status {
            status: response.status,
        });
    }
    Ok(response)
}
