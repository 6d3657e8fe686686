//! Register Screen Component
//!
//! All fields are validated together; a duplicate username comes back
//! from the backend as a field error.

use chassis_core::domain::validation::{FieldErrors, FormField, RegistrationForm, Title};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::{self, AuthFailure};
use crate::context::use_app_context;
use crate::models::Screen;

/// Labelled input bound to one form field
#[component]
fn FormInput(
    label: &'static str,
    field: FormField,
    #[prop(default = "text")] input_type: &'static str,
    form: RwSignal<RegistrationForm>,
    errors: RwSignal<FieldErrors>,
    read: fn(&RegistrationForm) -> String,
    write: fn(&mut RegistrationForm, String),
) -> impl IntoView {
    view! {
        <label>{label}</label>
        <input
            type=input_type
            prop:value=move || form.with(read)
            on:input=move |ev| {
                let value = event_target_value(&ev);
                form.update(|f| write(f, value));
                errors.update(|e| e.clear(field));
            }
        />
        {move || errors.with(|e| e.get(field).map(|m| view! { <p class="field-error">{m.to_string()}</p> }))}
    }
}

#[component]
pub fn RegisterScreen() -> impl IntoView {
    let ctx = use_app_context();

    let form = RwSignal::new(RegistrationForm::default());
    let errors = RwSignal::new(FieldErrors::new());
    let (message, set_message) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get() { return; }
        let current = form.get();
        set_message.set(None);
        set_loading.set(true);

        spawn_local(async move {
            match commands::register(&current).await {
                Ok(()) => {
                    errors.set(FieldErrors::new());
                    commands::alert("Registration successful! Please login.");
                    ctx.replace(Screen::Login);
                }
                Err(AuthFailure::Fields(field_errors)) => errors.set(field_errors),
                Err(AuthFailure::Message(text)) => set_message.set(Some(text)),
            }
            set_loading.set(false);
        });
    };

    view! {
        <div class="auth-screen">
            <h1 class="auth-title">"Create Account"</h1>
            <form class="auth-form" on:submit=submit>
                <label>"Title"</label>
                <div class="title-selector">
                    {[Title::Male, Title::Female].into_iter().map(|title| {
                        let is_selected = move || form.with(|f| f.title == title);
                        view! {
                            <button
                                type="button"
                                class=move || if is_selected() { "type-btn active" } else { "type-btn" }
                                on:click=move |_| form.update(|f| f.title = title)
                            >
                                {title.as_str()}
                            </button>
                        }
                    }).collect_view()}
                </div>

                <FormInput label="First Name" field=FormField::FirstName form=form errors=errors
                    read=|f| f.first_name.clone() write=|f, v| f.first_name = v />
                <FormInput label="Last Name" field=FormField::LastName form=form errors=errors
                    read=|f| f.last_name.clone() write=|f, v| f.last_name = v />
                <FormInput label="Email" field=FormField::Email input_type="email" form=form errors=errors
                    read=|f| f.email.clone() write=|f, v| f.email = v />
                <FormInput label="Username" field=FormField::Username form=form errors=errors
                    read=|f| f.username.clone() write=|f, v| f.username = v />
                <FormInput label="Password" field=FormField::Password input_type="password" form=form errors=errors
                    read=|f| f.password.clone() write=|f, v| f.password = v />
                <FormInput label="Confirm Password" field=FormField::ConfirmPassword input_type="password" form=form errors=errors
                    read=|f| f.confirm_password.clone() write=|f, v| f.confirm_password = v />
                <FormInput label="Company Code" field=FormField::CompanyCode form=form errors=errors
                    read=|f| f.company_code.clone() write=|f, v| f.company_code = v />

                {move || message.get().map(|m| view! { <p class="error-banner">"Registration Failed: " {m}</p> })}

                <button type="submit" class="primary-btn" disabled=move || loading.get()>
                    {move || if loading.get() { "Registering..." } else { "Register" }}
                </button>
            </form>
            <p class="auth-switch">
                "Already have an account? "
                <a href="#" on:click=move |ev| {
                    ev.prevent_default();
                    ctx.replace(Screen::Login);
                }>"Login"</a>
            </p>
        </div>
    }
}
