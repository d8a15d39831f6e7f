//! Terminal rendering of resolved contributors for `--list`.

use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

use git_contributors_core::models::ResolvedContributor;

/// Print contributors as a terminal table.
pub fn print_contributors(contributors: &[ResolvedContributor]) {
    if contributors.is_empty() {
        println!("No contributors found.");
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Email", "Commits", "GitHub", "Social"]);

    for contributor in contributors {
        table.add_row(vec![
            Cell::new(&contributor.name),
            Cell::new(&contributor.email),
            Cell::new(contributor.commits),
            Cell::new(contributor.github.as_deref().unwrap_or("-")),
            Cell::new(
                contributor
                    .social
                    .as_ref()
                    .map(|s| s.text.as_str())
                    .unwrap_or("-"),
            ),
        ]);
    }

    println!("{}", table);
}
