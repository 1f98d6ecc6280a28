//! Saved list display formatting

use crate::models::{SavedList, SavedRestaurant};

fn width_of<'a>(values: impl Iterator<Item = &'a str>, header: &str) -> usize {
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0)
        .max(header.len())
}

/// Format the user's lists as a table
pub fn format_list_table(lists: &[SavedList]) -> String {
    if lists.is_empty() {
        return "No lists yet. Create one with 'forkly lists create <name>'.\n".to_string();
    }

    let name_width = width_of(lists.iter().map(|l| l.name.as_str()), "Name");

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>6}  {:<10}  {}\n",
        "Name",
        "Places",
        "Kind",
        "ID",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->6}  {:-<10}  {:-<12}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for list in lists {
        let kind = if list.is_system() { "system" } else { "" };
        output.push_str(&format!(
            "{:<name_width$}  {:>6}  {:<10}  {}\n",
            list.name,
            list.restaurant_count,
            kind,
            list.id,
            name_width = name_width,
        ));
    }

    output
}

/// Format one list with its restaurants
pub fn format_list_details(list: &SavedList, items: &[SavedRestaurant]) -> String {
    let mut output = String::new();
    output.push_str(&format!("List: {}\n", list.name));
    if let Some(kind) = list.system_type {
        output.push_str(&format!("  System list:  {}\n", kind));
    }
    if let Some(description) = &list.description {
        output.push_str(&format!("  Description:  {}\n", description));
    }
    output.push_str(&format!("  ID:           {}\n", list.id));
    output.push_str(&format!(
        "  Updated:      {}\n",
        list.updated_at.format("%Y-%m-%d")
    ));
    output.push('\n');

    if items.is_empty() {
        output.push_str("  (empty)\n");
        return output;
    }

    let name_width = width_of(items.iter().map(|i| i.restaurant.name.as_str()), "Restaurant");
    output.push_str(&format!(
        "  {:<name_width$}  {:>6}  {:<5}  {:<10}  {:<10}  {}\n",
        "Restaurant",
        "Rating",
        "Price",
        "Added",
        "Visited",
        "ID",
        name_width = name_width,
    ));
    for item in items {
        let visited = match (item.visited, item.visited_at) {
            (true, Some(at)) => at.format("%Y-%m-%d").to_string(),
            (true, None) => "yes".to_string(),
            (false, _) => String::new(),
        };
        output.push_str(&format!(
            "  {:<name_width$}  {:>6}  {:<5}  {:<10}  {:<10}  {}\n",
            item.restaurant.name,
            item.restaurant.rating_label(),
            item.restaurant.price_label(),
            item.added_at.format("%Y-%m-%d"),
            visited,
            item.restaurant.id.as_uuid(),
            name_width = name_width,
        ));
    }

    output
}
