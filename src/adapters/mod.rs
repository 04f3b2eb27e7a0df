//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter           | Implements       | Connects to                 |
//! |-------------------|------------------|-----------------------------|
//! | `http`            | HttpPort         | Dashboard server (reqwest)  |
//! | `log_sink`        | NotificationSink | Log output                  |
//! | `console_control` | RefreshControl   | Log output (headless button)|
//! | `reload`          | ReloadPort       | Log output + reload counter |
//! | `config_store`    | ConfigPort       | JSON file / in-memory store |

pub mod config_store;
pub mod console_control;
pub mod http;
pub mod log_sink;
pub mod reload;
