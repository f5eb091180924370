//! Drives the session: turns user input into lookups and prints the
//! rendered state after every transition.

use std::time::Instant;

use skycast_core::{
    Generation, LocationQuery, LocationSource, RenderState, Session, WeatherProvider, render,
};

pub struct App {
    session: Session,
    provider: Box<dyn WeatherProvider>,
    location: Box<dyn LocationSource>,
}

impl App {
    pub fn new(provider: Box<dyn WeatherProvider>, location: Box<dyn LocationSource>) -> Self {
        Self {
            session: Session::new(),
            provider,
            location,
        }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self.session.state(), RenderState::Result(_))
    }

    /// Expire a stale error banner. Called before reading the next input.
    pub fn tick(&mut self) {
        self.session.tick(Instant::now());
    }

    pub async fn lookup_city(&mut self, input: &str) {
        match LocationQuery::city(input) {
            Ok(query) => self.run_lookup(query).await,
            Err(err) => {
                // Empty input: no request goes out, the banner shows at once.
                self.session.reject(err.to_string(), Instant::now());
                self.show();
            }
        }
    }

    pub async fn lookup_coordinates(&mut self, lat: f64, lon: f64) {
        self.run_lookup(LocationQuery::coordinates(lat, lon)).await;
    }

    /// Resolve the device location first, then look up those coordinates.
    pub async fn lookup_here(&mut self) {
        let generation = self.session.begin_lookup();
        self.show();

        match self.location.locate().await {
            Ok(coords) => {
                let query = LocationQuery::coordinates(coords.lat, coords.lon);
                self.finish_lookup(generation, query).await;
            }
            Err(err) => {
                self.session
                    .complete(generation, Err(err.to_string()), Instant::now());
                self.show();
            }
        }
    }

    async fn run_lookup(&mut self, query: LocationQuery) {
        let generation = self.session.begin_lookup();
        self.show();
        self.finish_lookup(generation, query).await;
    }

    async fn finish_lookup(&mut self, generation: Generation, query: LocationQuery) {
        tracing::debug!(?query, "starting lookup");

        let outcome = self
            .provider
            .lookup(&query)
            .await
            .map_err(|err| err.to_string());

        self.session.complete(generation, outcome, Instant::now());
        self.show();
    }

    fn show(&self) {
        println!("{}", render(self.session.state()));
    }
}
