// src/utils/url.rs

//! URL construction for month calendar pages.

use url::Url;

use crate::error::Result;
use crate::models::TargetConfig;

/// URL fetched to read a month's calendar.
///
/// # Examples
/// ```
/// use slot_watch::models::TargetConfig;
/// use slot_watch::utils::url::month_url;
///
/// let url = month_url(&TargetConfig::default(), 9, 2025).unwrap();
/// assert!(url.as_str().ends_with("apttype=Submission&locationid=2&serviceid=2&month=9&year=2025"));
/// ```
pub fn month_url(target: &TargetConfig, month: u32, year: i32) -> Result<Url> {
    let mut url = Url::parse(&target.base_url)?;
    url.query_pairs_mut()
        .append_pair("apttype", &target.apt_type)
        .append_pair("locationid", &target.location_id)
        .append_pair("serviceid", &target.service_id)
        .append_pair("month", &month.to_string())
        .append_pair("year", &year.to_string());
    Ok(url)
}

/// Link a person can open to jump straight to a month's calendar.
///
/// Uses a zero-padded month and the configured anchor.
pub fn deep_link(target: &TargetConfig, month: u32, year: i32) -> Result<Url> {
    let mut url = Url::parse(&target.base_url)?;
    url.query_pairs_mut()
        .append_pair("month", &format!("{month:02}"))
        .append_pair("year", &year.to_string())
        .append_pair("apttype", &target.apt_type)
        .append_pair("locationid", &target.location_id)
        .append_pair("serviceid", &target.service_id);
    if !target.link_anchor.is_empty() {
        url.set_fragment(Some(&target.link_anchor));
    }
    Ok(url)
}
