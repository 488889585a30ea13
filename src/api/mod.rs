pub mod endpoint;
pub mod error;
pub mod headers;
pub mod response;

use crate::model;
use chrono::NaiveDate;
pub use error::Error;

pub fn client(username: String, password: String) -> model::Credentials {
    model::Credentials {
        base_url: endpoint::PORTAL_URL.to_owned(),
        username,
        password,
    }
}

/// Open an authenticated session with the default timeout.
pub async fn open(credentials: &model::Credentials) -> Result<model::Session, Error> {
    open_with_timeout(credentials, model::Timeout::default()).await
}

/// Fetch session cookies from the entry point, then log in.
///
/// The portal offers no dependable success signal, so any HTTP response to the login form
/// counts as logged in. Bad credentials only show up later as a `ParseError` on the first
/// fetch, when the portal renders its login page instead of data.
pub async fn open_with_timeout(
    credentials: &model::Credentials,
    timeout: model::Timeout,
) -> Result<model::Session, Error> {
    let client = reqwest::ClientBuilder::new()
        .cookie_store(true)
        .default_headers(headers::browser_headers(&credentials.base_url)?)
        .user_agent(headers::USER_AGENT)
        .connect_timeout(timeout.connect)
        .build()
        .map_err(|e| Error::InternalError(e.to_string()))?;

    let session = model::Session {
        base_url: credentials.base_url.to_owned(),
        timeout,
        client,
    };

    let handshake = get(&session, &session.base_url, &[], None).await?;
    log::debug!("handshake with {}: {}", session.base_url, handshake.status);

    let login = post(
        &session,
        &session.base_url,
        &[
            ("mailaddress", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
            ("omission", "on"),
            ("fnc", endpoint::LOGIN.fnc),
            ("act", endpoint::LOGIN.act),
        ],
        None,
    )
    .await?;
    /* Status deliberately not checked, see above */
    log::debug!("login form answered {}", login.status);

    Ok(session)
}

/// Release the session. Equivalent to dropping it.
pub fn close(session: model::Session) {
    drop(session)
}

async fn send(
    request: reqwest::RequestBuilder,
    timeout: model::Timeout,
) -> Result<model::RawResponse, Error> {
    let response = request.timeout(timeout.total()).send().await?;
    let status = response.status();
    let body = response.text().await?;

    log::trace!("status: {}, body: {}", status, body);
    Ok(model::RawResponse { status, body })
}

/// GET `url` with `query` on the session's cookies and headers.
///
/// `timeout` of `None` uses the session default. A per-call timeout only bounds the whole
/// request by its `total()`; the connect phase keeps the session's `connect` limit.
pub async fn get(
    session: &model::Session,
    url: &str,
    query: &[(&str, &str)],
    timeout: Option<model::Timeout>,
) -> Result<model::RawResponse, Error> {
    let request = session.client.get(url).query(query);
    send(request, timeout.unwrap_or(session.timeout)).await
}

/// POST `form` to `url`, form-encoded. Timeouts behave as in [`get`].
pub async fn post(
    session: &model::Session,
    url: &str,
    form: &[(&str, &str)],
    timeout: Option<model::Timeout>,
) -> Result<model::RawResponse, Error> {
    log::trace!(
        "POST {} fields: {:?}",
        url,
        form.iter().map(|(name, _)| name).collect::<Vec<_>>()
    );

    let request = session.client.post(url).form(form);
    send(request, timeout.unwrap_or(session.timeout)).await
}

/// POST a graph screen request and return its markup.
async fn screen(
    session: &model::Session,
    action: &endpoint::Action,
    period: (&str, &str),
    site_id: &model::SiteId,
) -> Result<String, Error> {
    log::debug!("{} {}={} for site {}", action.act, period.0, period.1, site_id);

    let response = post(
        session,
        &session.base_url,
        &[
            ("fnc", action.fnc),
            ("act", action.act),
            period,
            ("searchid", site_id),
        ],
        None,
    )
    .await?;

    if response.status.is_server_error() {
        return Err(Error::ProtocolError(response.status, response.body));
    }
    Ok(response.body)
}

/// Hourly generation of `site_id` on `date`, keyed `YYYY-MM-DDTHH:00:00`.
pub async fn get_hourly_kwh(
    session: &model::Session,
    site_id: &model::SiteId,
    date: NaiveDate,
) -> Result<model::TimeSeries, Error> {
    let day = date.format("%Y%m%d").to_string();
    let body = screen(session, endpoint::HOURLY, ("dispDay", &day), site_id).await?;
    response::parse_hourly(&body, date)
}

/// Daily generation of `site_id` in the month of `month`, keyed `YYYY-MM-DD`.
/// The day of `month` is ignored.
pub async fn get_daily_kwh(
    session: &model::Session,
    site_id: &model::SiteId,
    month: NaiveDate,
) -> Result<model::TimeSeries, Error> {
    let disp_month = month.format("%Y%m").to_string();
    let body = screen(session, endpoint::DAILY, ("dispMonth", &disp_month), site_id).await?;
    response::parse_daily(&body, month)
}
