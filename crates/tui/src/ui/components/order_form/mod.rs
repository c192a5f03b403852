mod order_form_component;
mod state;

pub use order_form_component::OrderFormComponent;
pub use state::OrderFormState;
