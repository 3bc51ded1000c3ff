use toolflow_protocol::{CatalogSummary, FlowLink, FlowLinksResponse, RankResponse, StageReport};

pub fn render_links(out: &FlowLinksResponse) -> String {
    let mut text = String::new();
    match &out.stage {
        Some(stage) => text.push_str(&format!("{} [{}]\n", out.slug, stage)),
        None => text.push_str(&format!("{} [unknown tool]\n", out.slug)),
    }
    push_section(&mut text, "Before", &out.before);
    push_section(&mut text, "After", &out.after);
    text
}

fn push_section(text: &mut String, title: &str, links: &[FlowLink]) {
    text.push_str(&format!("\n{title}:\n"));
    if links.is_empty() {
        text.push_str("  (none)\n");
        return;
    }
    for link in links {
        text.push_str(&format!(
            "  {:<32} {:<9} {}\n",
            link.href, link.stage, link.name
        ));
    }
}

pub fn render_stage(out: &StageReport) -> String {
    let mut text = format!("{} -> {}\n\n", out.slug, out.stage);
    for hit in &out.scores {
        let marker = if hit.stage == out.stage { "*" } else { " " };
        text.push_str(&format!("{marker} {:<9} {}\n", hit.stage, hit.hits));
    }
    text.push_str(&format!(
        "\nbefore targets: {}\nafter targets:  {}\n",
        join_or_dash(&out.before_targets),
        join_or_dash(&out.after_targets)
    ));
    text
}

pub fn render_rank(out: &RankResponse) -> String {
    let mut text = format!("{} ({})\n\n", out.slug, out.direction);
    if out.candidates.is_empty() {
        text.push_str("(no candidates)\n");
        return text;
    }
    text.push_str("score  cat stage overlap  tool\n");
    for candidate in &out.candidates {
        text.push_str(&format!(
            "{:>5} {:>4} {:>5} {:>7}  {} [{}]\n",
            candidate.score,
            candidate.parts.same_category,
            candidate.parts.target_stage,
            candidate.parts.token_overlap,
            candidate.link.slug,
            candidate.link.stage
        ));
    }
    text
}

pub fn render_catalog(out: &CatalogSummary) -> String {
    let mut text = format!(
        "Catalog: {} tools in {} categories\n\n",
        out.tools,
        out.categories.len()
    );
    for count in &out.stages {
        text.push_str(&format!("{:<9} {:>4}\n", count.stage, count.tools));
    }
    text
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolflow_protocol::{StageHits, SCHEMA_VERSION};

    #[test]
    fn unknown_tool_renders_empty_sections() {
        let out = FlowLinksResponse {
            schema_version: SCHEMA_VERSION,
            slug: "nope".to_string(),
            stage: None,
            limit: 3,
            before: Vec::new(),
            after: Vec::new(),
        };
        let text = render_links(&out);
        assert!(text.starts_with("nope [unknown tool]"));
        assert_eq!(text.matches("(none)").count(), 2);
    }

    #[test]
    fn stage_report_marks_winner() {
        let out = StageReport {
            slug: "json-minifier".to_string(),
            stage: "optimize".to_string(),
            scores: vec![
                StageHits {
                    stage: "collect".to_string(),
                    hits: 0,
                },
                StageHits {
                    stage: "optimize".to_string(),
                    hits: 3,
                },
            ],
            before_targets: vec!["verify".to_string(), "secure".to_string()],
            after_targets: vec!["deliver".to_string()],
        };
        let text = render_stage(&out);
        assert!(text.contains("* optimize"));
        assert!(text.contains("before targets: verify, secure"));
    }
}
