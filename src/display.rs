// src/display.rs
//! Presentation strings for kill events.
//!
//! The list rows, the latest-kill banner, and the detail view all render
//! fixed sentences from an event's fields; keeping them here makes the
//! formatting testable without any UI attached.

use crate::feed::types::KillEvent;

/// List-row and banner title: `Ana(p1) killed Bob(p2)`.
pub fn headline(ev: &KillEvent) -> String {
    format!(
        "{}({}) killed {}({})",
        ev.source_character, ev.source_player_id, ev.target_character, ev.target_player_id
    )
}

/// Subtitle under every row: `Final Blow: Railgun for 98 damage`.
pub fn final_blow(ev: &KillEvent) -> String {
    format!("Final Blow: {} for {} damage", ev.method, ev.damage)
}

/// The detail view's lines, top to bottom.
pub fn detail_lines(ev: &KillEvent) -> Vec<String> {
    vec![
        format!("{} killed {}", ev.source_player_id, ev.target_player_id),
        format!("{} killed {}", ev.source_character, ev.target_character),
        format!("{} for {} damage", ev.method, ev.damage),
        format!("Platform: {}", ev.platform),
        format!("Region: {}", ev.region),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> KillEvent {
        KillEvent {
            source_character: "Ana".into(),
            source_player_id: "p1".into(),
            target_character: "Bob".into(),
            target_player_id: "p2".into(),
            method: "Railgun".into(),
            damage: 98.0,
            platform: "pc".into(),
            region: "eu".into(),
        }
    }

    #[test]
    fn headline_matches_row_format() {
        assert_eq!(headline(&sample()), "Ana(p1) killed Bob(p2)");
    }

    #[test]
    fn final_blow_drops_trailing_zero_on_whole_damage() {
        assert_eq!(final_blow(&sample()), "Final Blow: Railgun for 98 damage");

        let mut ev = sample();
        ev.damage = 12.5;
        assert_eq!(final_blow(&ev), "Final Blow: Railgun for 12.5 damage");
    }

    #[test]
    fn detail_lines_are_ordered_top_to_bottom() {
        let lines = detail_lines(&sample());
        assert_eq!(
            lines,
            vec![
                "p1 killed p2",
                "Ana killed Bob",
                "Railgun for 98 damage",
                "Platform: pc",
                "Region: eu",
            ]
        );
    }
}
