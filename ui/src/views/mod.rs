mod classic;
pub use classic::ClassicView;

mod home;
pub use home::Home;

mod list;
pub use list::ListView;

mod login;
pub use login::Login;

mod route_view;
pub use route_view::RouteOutlet;
