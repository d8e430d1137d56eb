use serde::Serialize;

use crate::types::Zombie;

/// Findings shown without a pro key.
pub const FREE_LIMIT: usize = 5;

const PRO_KEY_MIN_LEN: usize = 8;

pub fn is_pro_key(key: Option<&str>) -> bool {
    key.map(|k| k.len() >= PRO_KEY_MIN_LEN).unwrap_or(false)
}

pub fn total_monthly_cost(zombies: &[Zombie]) -> f64 {
    zombies.iter().map(|zombie| zombie.monthly_cost).sum()
}

/// The slice of findings the current tier is allowed to show. Totals and
/// counts are never truncated, only the listing.
pub fn visible(zombies: &[Zombie], pro: bool) -> &[Zombie] {
    if pro || zombies.len() <= FREE_LIMIT {
        zombies
    } else {
        &zombies[..FREE_LIMIT]
    }
}

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub zombies: &'a [Zombie],
    pub total_monthly: f64,
    pub count: usize,
    pub pro: bool,
}

pub fn build_json_report(zombies: &[Zombie], pro: bool) -> JsonReport<'_> {
    JsonReport {
        zombies: visible(zombies, pro),
        total_monthly: total_monthly_cost(zombies),
        count: zombies.len(),
        pro,
    }
}

pub fn render_table(zombies: &[Zombie], pro: bool) -> String {
    if zombies.is_empty() {
        return "\n✅ No zombie resources found. Your cluster is clean!\n".to_string();
    }

    let shown = visible(zombies, pro);
    let hidden = zombies.len() - shown.len();

    let mut lines = Vec::new();
    lines.push(String::new());
    lines.push("🧟 K8sGhost Scan Results".to_string());
    lines.push("=".repeat(78));
    lines.push(format!(
        "{:<16} {:<14} {:<22} {:<22} {:>4} {:>7}",
        "KIND", "NAMESPACE", "NAME", "REASON", "AGE", "$/MO"
    ));
    lines.push("-".repeat(78));
    for zombie in shown {
        lines.push(format!(
            "{:<16} {:<14} {:<22} {:<22} {:>3}d ${:>6.1}",
            zombie.kind,
            zombie.namespace,
            zombie.name,
            zombie.reason,
            zombie.age_days,
            zombie.monthly_cost
        ));
    }
    lines.push("-".repeat(78));
    lines.push(format!(
        "💀 {} zombie resources | 💸 ${}/month reclaimable",
        zombies.len(),
        format_usd(total_monthly_cost(zombies))
    ));
    if hidden > 0 {
        lines.push(String::new());
        lines.push(format!(
            "🔒 {} more zombies hidden. Set K8SGHOST_PRO_KEY to unlock.",
            hidden
        ));
        lines.push("   Get your key → https://k8sghost.dev/pro".to_string());
    }
    lines.push(String::new());

    lines.join("\n")
}

// Thousands-grouped dollars with fixed cents, e.g. 1234.5 -> "1,234.50".
fn format_usd(amount: f64) -> String {
    let formatted = format!("{:.2}", amount);
    let (whole, cents) = match formatted.split_once('.') {
        Some(parts) => parts,
        None => (formatted.as_str(), "00"),
    };

    let digits: Vec<char> = whole.chars().collect();
    let mut grouped = String::new();
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }

    format!("{}.{}", grouped, cents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ZombieKind;

    fn zombie(kind: ZombieKind, name: &str, monthly_cost: f64) -> Zombie {
        Zombie {
            kind,
            name: name.to_string(),
            namespace: "prod".to_string(),
            reason: "not mounted by any workload".to_string(),
            monthly_cost,
            age_days: 30,
        }
    }

    fn many(count: usize) -> Vec<Zombie> {
        (0..count)
            .map(|i| {
                zombie(
                    ZombieKind::PersistentVolumeClaim,
                    &format!("claim-{i}"),
                    1.0,
                )
            })
            .collect()
    }

    #[test]
    fn test_is_pro_key() {
        assert!(!is_pro_key(None));
        assert!(!is_pro_key(Some("")));
        assert!(!is_pro_key(Some("short")));
        assert!(is_pro_key(Some("12345678")));
        assert!(is_pro_key(Some("ghost-mode-activated")));
    }

    #[test]
    fn test_visible_caps_free_tier_only() {
        let zombies = many(7);
        assert_eq!(visible(&zombies, false).len(), FREE_LIMIT);
        assert_eq!(visible(&zombies, true).len(), 7);

        let few = many(3);
        assert_eq!(visible(&few, false).len(), 3);

        // Exactly at the limit nothing is hidden
        let exact = many(FREE_LIMIT);
        assert_eq!(visible(&exact, false).len(), FREE_LIMIT);
    }

    #[test]
    fn test_render_table_empty_scan() {
        let table = render_table(&[], false);
        assert_eq!(
            table,
            "\n✅ No zombie resources found. Your cluster is clean!\n"
        );
    }

    #[test]
    fn test_render_table_layout() {
        let zombies = vec![zombie(ZombieKind::PersistentVolumeClaim, "data-old", 1.0)];
        let table = render_table(&zombies, false);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "🧟 K8sGhost Scan Results");
        assert_eq!(lines[2], "=".repeat(78));
        assert!(lines[3].starts_with("KIND"));
        assert!(lines[3].ends_with(" AGE    $/MO"));
        assert_eq!(lines[4], "-".repeat(78));
        assert!(lines[5].starts_with("PVC              prod"));
        assert!(lines[5].ends_with(" 30d $   1.0"));
        assert_eq!(lines[6], "-".repeat(78));
        assert_eq!(
            lines[7],
            "💀 1 zombie resources | 💸 $1.00/month reclaimable"
        );
        assert_eq!(lines.len(), 8);
        assert!(table.ends_with("/month reclaimable\n"));
    }

    #[test]
    fn test_render_table_truncates_rows_but_not_totals() {
        let zombies = many(7);
        let table = render_table(&zombies, false);

        assert!(table.contains("claim-4"));
        assert!(!table.contains("claim-5"));
        assert!(table.contains("💀 7 zombie resources | 💸 $7.00/month reclaimable"));

        // A blank line separates the totals from the lock note
        assert!(table.contains("reclaimable\n\n🔒 2 more zombies hidden. Set K8SGHOST_PRO_KEY to unlock."));
        assert!(table.ends_with("   Get your key → https://k8sghost.dev/pro\n"));
    }

    #[test]
    fn test_render_table_free_tier_shows_all_at_limit() {
        let zombies = many(FREE_LIMIT);
        let table = render_table(&zombies, false);

        assert!(table.contains("claim-4"));
        assert!(!table.contains("🔒"));
        assert!(table.contains("💀 5 zombie resources | 💸 $5.00/month reclaimable"));
    }

    #[test]
    fn test_render_table_pro_shows_everything() {
        let zombies = many(7);
        let table = render_table(&zombies, true);

        assert!(table.contains("claim-6"));
        assert!(!table.contains("🔒"));
    }

    #[test]
    fn test_json_report_truncates_list_only() {
        let zombies = many(7);
        let report = build_json_report(&zombies, false);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["zombies"].as_array().unwrap().len(), FREE_LIMIT);
        assert_eq!(value["count"], 7);
        assert_eq!(value["pro"], false);
        assert_eq!(value["total_monthly"].as_f64(), Some(7.0));
        assert_eq!(value["zombies"][0]["kind"], "PVC");
        assert_eq!(value["zombies"][0]["name"], "claim-0");
    }

    #[test]
    fn test_format_usd_groups_thousands() {
        assert_eq!(format_usd(0.0), "0.00");
        assert_eq!(format_usd(28.5), "28.50");
        assert_eq!(format_usd(999.999), "1,000.00");
        assert_eq!(format_usd(1234.5), "1,234.50");
        assert_eq!(format_usd(1234567.891), "1,234,567.89");
    }
}
