use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use yousmala_engine::OrderField;

/// Focus and cursor state of the order form modal.
///
/// Field values live in the engine draft; this only tracks which control is
/// active and where the product cursor sits.
#[derive(Debug)]
pub struct OrderFormState {
    pub container_focus: FocusFlag,
    pub f_supplier: FocusFlag,
    pub f_amount: FocusFlag,
    pub f_status: FocusFlag,
    pub f_client: FocusFlag,
    pub f_products: FocusFlag,
    pub f_confirm: FocusFlag,
    pub f_cancel: FocusFlag,
    /// Highlighted row of the product checklist.
    pub product_cursor: usize,
}

impl Default for OrderFormState {
    fn default() -> Self {
        Self {
            container_focus: FocusFlag::named("order_form"),
            f_supplier: FocusFlag::named("order_form.supplier"),
            f_amount: FocusFlag::named("order_form.total_amount"),
            f_status: FocusFlag::named("order_form.status"),
            f_client: FocusFlag::named("order_form.client"),
            f_products: FocusFlag::named("order_form.products"),
            f_confirm: FocusFlag::named("order_form.confirm"),
            f_cancel: FocusFlag::named("order_form.cancel"),
            product_cursor: 0,
        }
    }
}

impl OrderFormState {
    pub fn reset(&mut self) {
        self.product_cursor = 0;
    }

    pub fn flag_for(&self, field: OrderField) -> &FocusFlag {
        match field {
            OrderField::Supplier => &self.f_supplier,
            OrderField::TotalAmount => &self.f_amount,
            OrderField::Status => &self.f_status,
            OrderField::Client => &self.f_client,
            OrderField::Products => &self.f_products,
        }
    }

    /// The form field holding focus, if any. Buttons are not fields.
    pub fn focused_field(&self) -> Option<OrderField> {
        OrderField::ALL.into_iter().find(|field| self.flag_for(*field).get())
    }

    /// Move the product cursor, wrapping at both ends.
    pub fn move_product_cursor(&mut self, product_count: usize, forward: bool) {
        if product_count == 0 {
            self.product_cursor = 0;
            return;
        }
        let cursor = self.product_cursor.min(product_count - 1);
        self.product_cursor = if forward {
            (cursor + 1) % product_count
        } else {
            (cursor + product_count - 1) % product_count
        };
    }

    /// Keep the cursor inside a product list that may have shrunk.
    pub fn clamp_product_cursor(&mut self, product_count: usize) {
        self.product_cursor = self.product_cursor.min(product_count.saturating_sub(1));
    }
}

impl HasFocus for OrderFormState {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        builder.leaf_widget(&self.f_supplier);
        builder.leaf_widget(&self.f_amount);
        builder.leaf_widget(&self.f_status);
        builder.leaf_widget(&self.f_client);
        builder.leaf_widget(&self.f_products);
        builder.leaf_widget(&self.f_confirm);
        builder.leaf_widget(&self.f_cancel);
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}

/// Step a selector through its options.
///
/// The unselected placeholder sits before the first option, so stepping
/// forward from the last option (or backward from the first) returns to no
/// selection. A current value missing from `options` counts as the placeholder.
pub fn cycle_selection<T: PartialEq + Clone>(options: &[T], current: Option<&T>, forward: bool) -> Option<T> {
    if options.is_empty() {
        return None;
    }
    // Position 0 is the placeholder; options occupy 1..=len.
    let slots = options.len() + 1;
    let position = current
        .and_then(|value| options.iter().position(|option| option == value))
        .map_or(0, |index| index + 1);
    let next = if forward { (position + 1) % slots } else { (position + slots - 1) % slots };
    next.checked_sub(1).map(|index| options[index].clone())
}
