use anyhow::{bail, Context, Result};
use encore_client::{build_provider, fulfil, Config};
use encore_core::{Domain, PreferenceKey, Recommendations, Wizard, WizardState};

/// Preference values given on the command line.
#[derive(Debug, Default)]
pub struct Prefs {
    pub name: Option<String>,
    pub genre: Option<String>,
    pub era: Option<String>,
    pub mood: Option<String>,
}

/// Drive one wizard through all three steps and print the results.
pub async fn run(
    config: &Config,
    domain: Domain,
    favorites: &[String],
    prefs: Prefs,
    json: bool,
) -> Result<()> {
    let mut wizard = prepare(domain, favorites, prefs)?;
    let provider = build_provider(config).context("Failed to create provider")?;

    if !json {
        println!(
            "Asking the {} provider for {}...\n",
            provider.name(),
            wizard.profile().noun_plural
        );
    }

    fulfil(provider.as_ref(), &mut wizard).await?;

    match wizard.state() {
        WizardState::ShowingResults(results) => {
            if json {
                println!("{}", serde_json::to_string_pretty(results)?);
            } else {
                print!("{}", render(&wizard, results));
            }
            Ok(())
        }
        WizardState::Failed { reason } => bail!("Could not get recommendations: {}", reason),
        other => bail!("Wizard ended in unexpected state: {}", other.name()),
    }
}

/// Build a wizard on the preference step with `favorites` and `prefs`
/// applied.
fn prepare(domain: Domain, favorites: &[String], prefs: Prefs) -> Result<Wizard> {
    let mut wizard = Wizard::new(domain);
    for title in favorites {
        wizard
            .add(title)
            .with_context(|| format!("Cannot add favorite {:?}", title))?;
    }
    wizard.advance()?;

    let values = [
        (PreferenceKey::Name, prefs.name),
        (PreferenceKey::Genre, prefs.genre),
        (PreferenceKey::Era, prefs.era),
        (PreferenceKey::Mood, prefs.mood),
    ];
    for (key, value) in values {
        if let Some(value) = value {
            wizard.set_field(key, value);
        }
    }
    Ok(wizard)
}

fn render(wizard: &Wizard, results: &Recommendations) -> String {
    let items = &results.items;
    let profile = wizard.profile();
    let mut lines = Vec::new();

    let name = wizard.preferences().get(PreferenceKey::Name).trim();
    if name.is_empty() {
        lines.push(profile.results_heading.to_string());
    } else {
        lines.push(format!("{}, here are your recommendations", name));
    }
    lines.push(profile.results_subtitle.to_string());
    lines.push(format!("Fetched {}", results.fetched_label()));
    lines.push(String::new());

    if items.is_empty() {
        lines.push("No recommendations found.".to_string());
    }

    for (i, item) in items.iter().enumerate() {
        let rating = item
            .rating
            .map(|r| format!("  \u{2605} {:.1}", r))
            .unwrap_or_default();
        lines.push(format!("{:>2}. {}{}", i + 1, item.title, rating));
        let byline = item.byline();
        if !byline.is_empty() {
            lines.push(format!("    {}", byline));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
