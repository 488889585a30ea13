pub const PORTAL_URL: &str = "https://eco-megane.jp/index.php";

/// `fnc`/`act` pair selecting a screen on the portal's single endpoint.
pub struct Action {
    pub fnc: &'static str,
    pub act: &'static str,
}

pub const LOGIN: &Action = &Action {
    fnc: "login",
    act: "login",
};
pub const HOURLY: &Action = &Action {
    fnc: "ecograph",
    act: "hourdispScreen",
};
pub const DAILY: &Action = &Action {
    fnc: "ecograph",
    act: "daydispScreen",
};
