mod meta;
pub use self::meta::PageInfo;

mod response;
pub use self::response::ApiResponse;
