use contracts::domain::a004_business::aggregate::Business;
use contracts::shared::taxonomy_filter::TaxonomySnapshot;
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;

/// Снимок для главной: вся таксономия и одобренные бизнесы.
/// Видимые списки и фильтрация дальше считаются на клиенте.
pub async fn fetch_snapshot() -> Result<TaxonomySnapshot<Business>, String> {
    let response = Request::get(&api_url("/api/guide/snapshot"))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to fetch guide: {}", response.status()));
    }

    response
        .json::<TaxonomySnapshot<Business>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
