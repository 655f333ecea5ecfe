//! Moulage - Vue JSX component macros, cast into plain component options.
//!
//! Authoring code imports compile-time macros from a macro module and uses them
//! to describe Vue components with full type information:
//!
//! ```ts
//! import { component, type, EVENTS } from 'vue-jsx-component.macro'
//!
//! export const Counter = component({
//!   props: { start: type<number>() },
//!   [EVENTS]: {} as { change: number },
//!   render() { return <div>{this.start}</div> },
//! })
//! ```
//!
//! [`transform_macros`] removes every trace of the macros, leaving the options
//! object Vue understands natively:
//!
//! ```ts
//! export const Counter = {
//!   name: "Counter", props: { start: Number },
//!   render() { return <div>{this.start}</div> },
//! }
//! ```
//!
//! # Rules
//!
//! - `component(def)` / `functional(def)`: unwrap the definition, infer a
//!   `name` in development builds, rewrite `props`
//! - `functional(render)`: wrap a bare render function, inject `h`
//! - `type<T>()`: runtime prop type inside `props`, `void 0` elsewhere
//! - `EVENTS` / `STATES` / `SCOPED_SLOTS`: type-only keys, removed
//! - `INJECTIONS`: renamed to `inject`, or routed through `mixins`
//!
//! The transform is source-to-source: untouched code keeps its formatting.

mod ast_utils;
pub mod error;
pub mod macros;
pub mod options;
pub mod references;
mod rules;
pub mod scope;
mod transform;

pub use error::{MacroError, MacroUsageError, SourceLocation};
pub use macros::MacroKind;
pub use options::{BuildMode, MacroOptions};
pub use references::{collect_references, CollectedReferences, ReferenceMap, UsageSite};
pub use transform::{transform_macros, MacroTransformResult};
