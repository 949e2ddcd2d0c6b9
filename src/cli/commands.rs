use crate::api::models::SearchEnvelope;
use crate::{Error, Result};
use reqwest::{Client, StatusCode};

/// Query a running server and return its envelope.
///
/// `global` uses `/search/{page}` (whole-corpus ranking, fixed page size);
/// otherwise `/search` with the server's configured strategy.
pub async fn search(
    server_url: &str,
    ingredients: &str,
    page: Option<u32>,
    limit: Option<u32>,
    global: bool,
) -> Result<SearchEnvelope> {
    let client = Client::new();
    let server_url = server_url.trim_end_matches('/');

    let url = if global {
        format!(
            "{}/search/{}?ingredients={}",
            server_url,
            page.unwrap_or(1),
            urlencoding::encode(ingredients)
        )
    } else {
        let mut url = format!("{}/search?s={}", server_url, urlencoding::encode(ingredients));
        if let Some(page) = page {
            url.push_str(&format!("&page={page}"));
        }
        if let Some(limit) = limit {
            url.push_str(&format!("&limit={limit}"));
        }
        url
    };

    let response = client.get(&url).send().await?;
    let status = response.status();

    if status.is_success() {
        return Ok(response.json().await?);
    }

    // Error bodies use the same envelope; fall back to the status text
    let message = response
        .json::<SearchEnvelope>()
        .await
        .ok()
        .and_then(|envelope| envelope.message)
        .unwrap_or_else(|| status.to_string());

    Err(match status {
        StatusCode::BAD_REQUEST => Error::InvalidQuery(message),
        StatusCode::NOT_FOUND => Error::NoMatch(message),
        _ => Error::Internal(format!("Server returned {status}: {message}")),
    })
}

/// Render a search envelope as a ranked list
pub fn format_search_results(envelope: &SearchEnvelope) -> String {
    let recipes = envelope.recipes.as_deref().unwrap_or_default();
    let mut out = String::new();

    if recipes.is_empty() {
        out.push_str("No recipes found.\n");
        return out;
    }

    if let Some(pagination) = &envelope.pagination {
        out.push_str(&format!(
            "Page {} ({} per page, {} matched, {})\n\n",
            pagination.page, pagination.limit, pagination.total, pagination.strategy
        ));
    }

    for (i, recipe) in recipes.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} [{} match{}]\n",
            i + 1,
            recipe.title,
            recipe.matches,
            if recipe.matches == 1 { "" } else { "es" }
        ));
        out.push_str(&format!("   Key: {}\n", recipe.key));
        if let Some(times) = &recipe.times {
            out.push_str(&format!("   Time: {times}\n"));
        }
        if let Some(difficulty) = &recipe.difficulty {
            out.push_str(&format!("   Difficulty: {difficulty}\n"));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const BODY: &str = r#"{
        "error": false,
        "message": "success",
        "recipes": [
            {"key": "2", "title": "Pudding", "thumb": null, "times": "20 menit", "difficulty": "Mudah", "matches": 2},
            {"key": "1", "title": "Nasi Goreng", "thumb": null, "times": null, "difficulty": null, "matches": 1}
        ],
        "pagination": {"page": 1, "limit": 10, "total": 2, "total_pages": 1, "strategy": "global_rank"}
    }"#;

    #[tokio::test]
    async fn test_search_global_uses_paged_route() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search/1")
            .match_query(Matcher::UrlEncoded(
                "ingredients".into(),
                "egg, milk".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(BODY)
            .create_async()
            .await;

        let envelope = search(&server.url(), "egg, milk", None, None, true)
            .await
            .unwrap();
        mock.assert_async().await;

        let recipes = envelope.recipes.as_ref().unwrap();
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].key, "2");

        let rendered = format_search_results(&envelope);
        assert!(rendered.contains("1. Pudding [2 matches]"));
        assert!(rendered.contains("2. Nasi Goreng [1 match]"));
        assert!(rendered.contains("global_rank"));
    }

    #[tokio::test]
    async fn test_search_passes_page_and_limit() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("s".into(), "egg".into()),
                Matcher::UrlEncoded("page".into(), "2".into()),
                Matcher::UrlEncoded("limit".into(), "5".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(BODY)
            .create_async()
            .await;

        search(&server.url(), "egg", Some(2), Some(5), false)
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_not_found_surfaces_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": true, "message": "Recipe not found"}"#)
            .create_async()
            .await;

        let result = search(&server.url(), "pepper", None, None, false).await;
        match result {
            Err(Error::NoMatch(msg)) => assert_eq!(msg, "Recipe not found"),
            other => panic!("expected NoMatch, got {other:?}"),
        }
    }

    #[test]
    fn test_format_empty() {
        let envelope = SearchEnvelope {
            error: false,
            message: None,
            recipes: Some(vec![]),
            pagination: None,
        };
        assert_eq!(format_search_results(&envelope), "No recipes found.\n");
    }
}
