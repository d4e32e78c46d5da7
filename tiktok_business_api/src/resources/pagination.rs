use serde_json::{json, Value};

use crate::{
    client::{Client, Params},
    Error,
};

/// Walks `path` page by page from `first_page`, handing every item to
/// `each` in order.
///
/// Stops on the first empty page, otherwise asks
/// [`PageInfo::has_next_page`](crate::PageInfo::has_next_page). A page
/// without `page_info` is the last one.
pub(crate) async fn paginate<F>(
    client: &Client,
    path: &str,
    mut params: Params,
    list_key: &str,
    first_page: u64,
    page_size: u64,
    mut each: F,
) -> Result<(), Error>
where
    F: FnMut(Value),
{
    let mut page = first_page.max(1);
    loop {
        params.insert("page".to_string(), json!(page));
        params.insert("page_size".to_string(), json!(page_size));

        let mut response = client.get(path, params.clone()).await?;
        let items = response.take_items(list_key);
        if items.is_empty() {
            break;
        }
        let page_info = response.page_info();
        items.into_iter().for_each(&mut each);

        match page_info {
            Some(info) if info.has_next_page(page, page_size) => page += 1,
            _ => break,
        }
    }
    Ok(())
}
