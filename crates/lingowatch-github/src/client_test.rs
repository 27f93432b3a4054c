use super::*;

fn test_client(base_url: &str) -> GithubClient {
    GithubClient::with_base_url(None, 30, "lingowatch-test/0.1", 0, 0, base_url)
        .expect("client construction should not fail")
}

#[test]
fn build_url_joins_path_and_params() {
    let client = test_client("https://api.github.com");
    let url = client.build_url("repos/spotify/web-api/commits", &[("per_page", "20")]);
    assert_eq!(
        url.as_str(),
        "https://api.github.com/repos/spotify/web-api/commits?per_page=20"
    );
}

#[test]
fn build_url_strips_trailing_slash() {
    let client = test_client("https://api.github.com/");
    let url = client.build_url("repos/uber/baseweb", &[]);
    assert_eq!(url.as_str(), "https://api.github.com/repos/uber/baseweb");
}

#[test]
fn build_url_multiple_params() {
    let client = test_client("https://api.github.com");
    let url = client.build_url(
        "repos/stripe/stripe-node/pulls",
        &[("state", "open"), ("per_page", "30")],
    );
    assert_eq!(
        url.as_str(),
        "https://api.github.com/repos/stripe/stripe-node/pulls?state=open&per_page=30"
    );
}
