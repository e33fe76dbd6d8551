use clap::ValueEnum;

/// Course status selection of the filter control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StatusFilter {
    #[default]
    All,
    Enabled,
    Disabled,
}

impl StatusFilter {
    /// Query-string fragment appended to the course list endpoint.
    pub fn query(self) -> &'static str {
        match self {
            StatusFilter::All => "",
            StatusFilter::Enabled => "?enabled=true",
            StatusFilter::Disabled => "?enabled=false",
        }
    }
}

/// Radio group translating the selected status into a query string.
#[derive(Debug, Default)]
pub struct FilterForm {
    selection: StatusFilter,
}

impl FilterForm {
    pub fn selection(&self) -> StatusFilter {
        self.selection
    }

    pub fn select(&mut self, value: StatusFilter, on_status_change: impl FnOnce(&'static str)) {
        self.selection = value;
        on_status_change(value.query());
    }

    pub fn reset(&mut self) {
        self.selection = StatusFilter::default();
    }
}
