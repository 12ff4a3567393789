mod helpers;
mod test_auth_guard;
mod test_flows;
