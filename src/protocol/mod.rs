//! Protocol Module
//!
//! Defines the text wire protocol spoken with the server mod.
//!
//! ## Protocol Format
//!
//! ### Request Format
//! ```text
//! world.setBlock(0,64,0,STONE)\n
//! └──── name ──┘└─── tokens ──┘
//! ```
//!
//! Exactly one command per line, tokens joined by `,`. One-way commands
//! get no answer; queries get exactly one response line.
//!
//! ### Response Format
//! ```text
//! 12.5,64.0,-3.0\n                   payload
//! 1,PIG,0.5,64.0,2.5|2,COW,...\n     records split by `|`, fields by `,`
//! Fail: unknown block\n              server-side error
//! ```

mod command;
mod response;
mod codec;
mod value;

pub use command::Request;
pub use response::{Response, FAIL_MARKER};
pub use codec::{
    decode_response, encode_request, escape_str, read_response, validate_command, write_request,
    LineBuffer, ARG_SEPARATOR, RECORD_SEPARATOR, RESERVED,
};
pub use value::{flatten, flatten_all, flatten_with_depth, Arg, Token};
