use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Chip,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ButtonSize {
    Small,
    #[default]
    Large,
}

impl ButtonVariant {
    fn get_classes(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => {
                "gap-2 rounded-xl text-white \
                 bg-blue-600 hover:bg-blue-700 \
                 focus:ring-2 focus:ring-blue-500"
            }
            ButtonVariant::Chip => {
                "rounded-lg text-gray-200 \
                 bg-gray-800 hover:bg-gray-700"
            }
        }
    }

    fn disabled_classes(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "bg-blue-400 hover:bg-blue-400 cursor-not-allowed",
            ButtonVariant::Chip => "opacity-50 cursor-not-allowed",
        }
    }
}

impl ButtonSize {
    fn get_classes(&self) -> &'static str {
        match self {
            ButtonSize::Small => "px-3 py-1 text-sm",
            ButtonSize::Large => "px-5 py-3 text-lg",
        }
    }
}

#[component]
pub fn Button(
    #[prop(optional)] variant: ButtonVariant,
    #[prop(optional)] size: ButtonSize,
    #[prop(into, default = Signal::stored(false))] disabled: Signal<bool>,
    #[prop(optional)] submit: bool,
    #[prop(optional, into)] class: String,
    #[prop(optional)] on_click: Option<Callback<web_sys::MouseEvent>>,
    children: Children,
) -> impl IntoView {
    let base_classes = "inline-flex items-center justify-center font-medium transition focus:outline-none";
    let variant_classes = variant.get_classes();
    let size_classes = size.get_classes();

    let combined_classes = move || {
        let state_classes = if disabled.get() {
            variant.disabled_classes()
        } else {
            "cursor-pointer"
        };
        format!(
            "{} {} {} {} {}",
            base_classes, variant_classes, size_classes, state_classes, class
        )
    };

    view! {
        <button
            type=if submit { "submit" } else { "button" }
            class=combined_classes
            disabled=move || disabled.get()
            on:click=move |ev| {
                if !disabled.get_untracked() {
                    if let Some(handler) = on_click {
                        handler.run(ev);
                    }
                }
            }
        >
            {children()}
        </button>
    }
}
