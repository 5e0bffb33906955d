macro_rules! regex {
    ($regex:literal $(,)?) => {{
        static REGEX: ::once_cell::sync::OnceCell<::regex::Regex> =
            ::once_cell::sync::OnceCell::new();
        REGEX.get_or_init(|| ::regex::Regex::new($regex).unwrap())
    }};
}
pub(crate) use regex;

macro_rules! selector {
    ($selector:literal $(,)?) => {{
        static SELECTOR: ::once_cell::sync::OnceCell<::scraper::Selector> =
            ::once_cell::sync::OnceCell::new();
        SELECTOR.get_or_init(|| ::scraper::Selector::parse($selector).unwrap())
    }};
}
pub(crate) use selector;
