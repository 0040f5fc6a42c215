use goldberries::context::DataContext;

#[derive(Clone, Copy)]
pub struct AppContext {
	pub ctx: &'static DataContext,
}

impl AppContext {
	pub fn new(ctx: &'static DataContext) -> Self {
		Self { ctx }
	}
}
