use encore_core::{Domain, DomainProfile, FieldKind};

/// Print every section with its preference fields and options.
pub fn show() {
    for (i, domain) in Domain::ALL.into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!("{}", describe(domain.profile()));
    }
}

fn describe(profile: &DomainProfile) -> String {
    let mut lines = vec![
        format!("{} {} ({})", profile.icon, profile.title, profile.domain),
        format!("  {}", profile.description),
    ];

    for field in profile.fields {
        match field.kind {
            FieldKind::Text { .. } => {
                lines.push(format!("  {} [{}]: free text", field.label, field.key));
            }
            FieldKind::Choice { options, .. } => {
                let values: Vec<_> = options.iter().map(|(value, _)| *value).collect();
                lines.push(format!(
                    "  {} [{}]: {}",
                    field.label,
                    field.key,
                    values.join(", ")
                ));
            }
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
