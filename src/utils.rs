// Quote a worksheet title for use in an A1 range
pub fn quote_sheet_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

// Range covering a whole worksheet
pub fn sheet_range(title: &str) -> String {
    quote_sheet_title(title)
}

// Range starting at `anchor` on the given worksheet
pub fn anchored_range(title: &str, anchor: &str) -> String {
    format!("{}!{}", quote_sheet_title(title), anchor)
}
