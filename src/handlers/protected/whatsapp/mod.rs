// handlers/protected/whatsapp/mod.rs - WhatsApp instance management
//
// Instance lifecycle, pairing and group listing all live in the backend;
// these handlers only forward.

pub mod connection; // connect (QR), status, groups
pub mod instances;  // list, create, delete

pub use connection::connect as instance_connect;
pub use connection::groups as instance_groups;
pub use connection::status as instance_status;
pub use instances::create as instance_create;
pub use instances::delete as instance_delete;
pub use instances::list as instances_list;
