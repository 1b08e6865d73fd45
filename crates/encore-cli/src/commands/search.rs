use anyhow::{bail, Context, Result};
use encore_client::{Config, SearchClient, SearchHit};
use encore_core::Domain;

/// Search the recommendation service and print the hits.
///
/// With `tv` set the movie section searches TV shows instead of films.
pub async fn run(config: &Config, domain: Domain, tv: bool, query: &str) -> Result<()> {
    check_scope(domain, tv)?;

    let client = SearchClient::new(&config.service_url, config.request_timeout())
        .context("Failed to create search client")?;

    let hits = if tv {
        client.search_tv_shows(query).await
    } else {
        client.search(domain, query).await
    }
    .with_context(|| format!("Search against {} failed", config.service_url))?;

    let noun = if tv { "TV shows" } else { domain.profile().noun_plural };
    print!("{}", render(&hits, noun, query));

    Ok(())
}

fn check_scope(domain: Domain, tv: bool) -> Result<()> {
    if tv && domain != Domain::Movie {
        bail!("--tv only applies to the movie section, not {}", domain);
    }
    Ok(())
}

fn render(hits: &[SearchHit], noun: &str, query: &str) -> String {
    if hits.is_empty() {
        return format!("No {} found matching {:?}.\n", noun, query.trim());
    }

    let mut lines: Vec<String> = hits
        .iter()
        .map(|hit| format!("{:>10}  {}", hit.id.as_deref().unwrap_or("-"), hit.label()))
        .collect();
    lines.push(String::new());
    lines.push(format!("{} result(s)", hits.len()));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
