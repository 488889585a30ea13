use crate::api::Error;
use crate::model::{KWh, TimeSeries};
use chrono::{Datelike, Days, Duration, NaiveDate, NaiveTime};
use scraper::{ElementRef, Html, Selector};
use std::borrow::Cow;

/// Root element of generation payloads.
const ROOT: &str = "hatsuden";
const HOUR: &str = "time";
const DAY: &str = "day";
const CDATA_START: &str = "<![CDATA[";
const CDATA_END: &str = "]]>";

fn selector(name: &str) -> Result<Selector, Error> {
    Selector::parse(name).map_err(|e| Error::InternalError(format!("{}: {:?}", name, e)))
}

/// Numeric reading of a sample, `None` for `-`, blanks and anything else non-numeric.
pub fn parse_kwh(text: &str) -> Option<KWh> {
    text.trim().parse::<KWh>().ok()
}

/// Replace CDATA sections with their escaped content. An HTML parser reads them as comments.
fn unwrap_cdata(body: &str) -> Cow<'_, str> {
    if !body.contains(CDATA_START) {
        return Cow::Borrowed(body);
    }

    let mut output = String::with_capacity(body.len());
    let mut rest = body;
    while let Some(start) = rest.find(CDATA_START) {
        output.push_str(&rest[..start]);
        let content = &rest[start + CDATA_START.len()..];
        let (data, tail) = match content.find(CDATA_END) {
            Some(end) => (&content[..end], &content[end + CDATA_END.len()..]),
            None => (content, ""),
        };
        for c in data.chars() {
            match c {
                '&' => output.push_str("&amp;"),
                '<' => output.push_str("&lt;"),
                '>' => output.push_str("&gt;"),
                _ => output.push(c),
            }
        }
        rest = tail;
    }
    output.push_str(rest);
    Cow::Owned(output)
}

/// Text below `element`, skipping nested elements named `name`: an HTML parser nests the
/// next sample into a self-closed `<time/>`.
fn sample_text(element: ElementRef, name: &str, output: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            output.push_str(text);
        } else if let Some(nested) = ElementRef::wrap(child) {
            if nested.value().name() != name {
                sample_text(nested, name, output);
            }
        }
    }
}

/// Readings of every `child` below the first `<hatsuden>`, in document order.
///
/// The payload is XML, but is parsed as HTML to tolerate whatever the portal renders.
fn readings(body: &str, child: &str) -> Result<Vec<Option<KWh>>, Error> {
    let document = Html::parse_document(&unwrap_cdata(body));

    let root = document
        .select(&selector(ROOT)?)
        .next()
        .ok_or_else(|| Error::ParseError(format!("no <{}> element in response", ROOT)))?;

    let values = root
        .select(&selector(child)?)
        .map(|element| {
            let mut text = String::new();
            sample_text(element, child, &mut text);
            parse_kwh(&text)
        })
        .collect::<Vec<_>>();

    log::trace!("<{}> readings: {:?}", child, values);
    Ok(values)
}

/// Hourly series of `date`: the n-th `<time>` is hour n.
pub fn parse_hourly(body: &str, date: NaiveDate) -> Result<TimeSeries, Error> {
    let midnight = date.and_time(NaiveTime::MIN);
    let mut series = TimeSeries::new();

    for (hour, kwh) in readings(body, HOUR)?.into_iter().enumerate() {
        let timestamp = midnight
            .checked_add_signed(Duration::hours(hour as i64))
            .ok_or_else(|| Error::ParseError(format!("hour {} out of range", hour)))?;
        series.push(timestamp.format("%Y-%m-%dT%H:%M:%S").to_string(), kwh);
    }

    Ok(series)
}

/// Daily series of the month containing `month`: the n-th `<day>` is day n + 1.
pub fn parse_daily(body: &str, month: NaiveDate) -> Result<TimeSeries, Error> {
    let first = month
        .with_day(1)
        .ok_or_else(|| Error::InternalError(format!("no first day for {}", month)))?;
    let mut series = TimeSeries::new();

    for (offset, kwh) in readings(body, DAY)?.into_iter().enumerate() {
        let day = first
            .checked_add_days(Days::new(offset as u64))
            .ok_or_else(|| Error::ParseError(format!("day {} out of range", offset + 1)))?;
        series.push(day.format("%Y-%m-%d").to_string(), kwh);
    }

    Ok(series)
}
