//! Field adapters and presentational widgets. Every component turns state into a
//! view model; none of them issue requests or hold business rules.

mod breakpoint;
mod confirm_popover;
pub mod fields;
mod nav;
mod responsive_icon_button;
mod toast;

pub use breakpoint::{Breakpoint, BreakpointValues};
pub use confirm_popover::{ConfirmPopover, PopoverPanelView};
pub use nav::{MenuGroupView, Nav, NavItem, NavItemView, NavSectionView, NavView};
pub use responsive_icon_button::{ButtonView, IconPosition, ResponsiveIconButton};
pub use toast::{Toast, ToastStatus, Toaster};
