use std::sync::Arc;

use insight_store::{Store, UserStore};

use crate::countries::CountryClient;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: Arc<Store>,
    pub users: Arc<dyn UserStore>,
    pub jwt_secret: String,
    pub countries: CountryClient,
}
