use std::io::Read;

use flate2::read::GzDecoder;

use crate::input::{BaseLocation, LoadError, ResourceLocation};

pub async fn retrieve_text(location: &ResourceLocation) -> Result<String, LoadError> {
    let bytes = match &location.base {
        BaseLocation::Local(dir) => {
            let path = dir.join(&location.asset);
            tracing::debug!(path = %path.display(), "reading local asset");
            tokio::fs::read(&path)
                .await
                .map_err(|e| retrieval_error(location, e))?
        }
        BaseLocation::Remote(base) => fetch_remote(location, base).await?,
    };

    let bytes = if location.is_gzip() {
        gunzip(&bytes).map_err(|e| retrieval_error(location, e))?
    } else {
        bytes
    };

    String::from_utf8(bytes).map_err(|e| retrieval_error(location, e))
}

async fn fetch_remote(location: &ResourceLocation, base: &str) -> Result<Vec<u8>, LoadError> {
    let url = join_url(base, &location.asset);
    tracing::debug!(url = %url, "fetching remote asset");

    let response = reqwest::get(&url)
        .await
        .map_err(|e| retrieval_error(location, e))?;
    let status = response.status();
    if !status.is_success() {
        return Err(retrieval_error(location, format!("HTTP {status}")));
    }
    let body = response
        .bytes()
        .await
        .map_err(|e| retrieval_error(location, e))?;
    Ok(body.to_vec())
}

pub fn join_url(base: &str, asset: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        asset.trim_start_matches('/')
    )
}

fn gunzip(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(data);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}

fn retrieval_error(location: &ResourceLocation, reason: impl std::fmt::Display) -> LoadError {
    LoadError::Retrieval {
        location: location.to_string(),
        reason: reason.to_string(),
    }
}
