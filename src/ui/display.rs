//! Plain-text rendering of rankings and catalog results

use crate::catalog::CatalogItem;
use crate::core::types::RankedItem;
use crate::ranking::RankedList;

pub fn format_rankings(list: &RankedList) -> String {
    if list.is_empty() {
        return "Your ranking list is empty. Search for a movie and rank it to get started.\n"
            .to_string();
    }

    let mut out = String::new();
    for (index, item) in list.iter().enumerate() {
        out.push_str(&format!(
            "#{:<3} {:>4.1}  {} ({}) [{}]\n",
            index + 1,
            item.score,
            item.title,
            item.year_label(),
            item.tier
        ));
    }
    out
}

pub fn format_search_results(results: &[CatalogItem]) -> String {
    if results.is_empty() {
        return "No pictures found.\n".to_string();
    }

    let mut out = String::new();
    for item in results {
        let year = item
            .release_year()
            .map(|y| y.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        out.push_str(&format!("{:>8}  {} ({})\n", item.id, item.title, year));
    }
    out
}

/// Detail view of one catalog item, with its place in the rankings if it has one
pub fn format_details(item: &CatalogItem, ranked: Option<(usize, &RankedItem)>) -> String {
    let year = item
        .release_year()
        .map(|y| y.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    let mut out = format!("{} ({})
", item.title, year);
    out.push_str(&format!("Rating {:.1}
", item.vote_average));
    match ranked {
        Some((index, entry)) => out.push_str(&format!(
            "Ranked #{} with {:.1} ({})
",
            index + 1,
            entry.score,
            entry.tier
        )),
        None => out.push_str("Not ranked yet
"),
    }
    if !item.overview.trim().is_empty() {
        out.push('\n');
        out.push_str(item.overview.trim());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ItemId;
    use crate::ranking::Tier;

    fn heat() -> CatalogItem {
        CatalogItem {
            id: ItemId(949),
            title: "Heat".to_string(),
            overview: "A group of high-end professional thieves.".to_string(),
            poster_path: Some("/heat.jpg".to_string()),
            release_date: "1995-12-15".to_string(),
            vote_average: 7.94,
        }
    }

    #[test]
    fn test_empty_rankings_message() {
        assert!(format_rankings(&RankedList::new()).contains("empty"));
    }

    #[test]
    fn test_rankings_lines() {
        let list = RankedList::from_items(vec![
            RankedItem::new(1, "Heat", Tier::High, 9.5).with_release_year(1995),
            RankedItem::new(2, "Cats", Tier::Low, 2.0),
        ])
        .unwrap();
        let text = format_rankings(&list);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("#1"));
        assert!(lines[0].contains("9.5  Heat (1995) [masterpiece]"));
        assert!(lines[1].contains("Cats (N/A) [flop]"));
    }

    #[test]
    fn test_details_for_ranked_item() {
        let entry = RankedItem::from_catalog(&heat(), Tier::High, 9.5);
        let text = format_details(&heat(), Some((0, &entry)));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Heat (1995)");
        assert_eq!(lines[1], "Rating 7.9");
        assert_eq!(lines[2], "Ranked #1 with 9.5 (masterpiece)");
        assert_eq!(lines[4], "A group of high-end professional thieves.");
    }

    #[test]
    fn test_details_for_unranked_item_without_overview() {
        let mut item = heat();
        item.overview = String::new();
        item.release_date = String::new();
        let text = format_details(&item, None);
        assert_eq!(text, "Heat (N/A)\nRating 7.9\nNot ranked yet\n");
    }
}
