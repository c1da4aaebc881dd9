// crawler/src/cursor.rs
//! 掘金推荐流的分页游标
//!
//! 第一页固定为 `"0"`，之后是 `{"v":<版本>,"i":<偏移>}` 的 base64。
//! 版本号是写死的，上游一旦更换游标格式，生成的游标会悄悄失效。

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// 上游游标格式中的版本号
pub const CURSOR_VERSION: &str = "6956728664562073630";

pub fn encode_cursor(offset: usize) -> String {
    if offset == 0 {
        return String::from("0");
    }

    let raw = format!(r#"{{"v":"{CURSOR_VERSION}","i":{offset}}}"#);
    STANDARD.encode(raw)
}
