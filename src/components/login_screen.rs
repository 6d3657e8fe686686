//! Login Screen Component

use chassis_core::domain::validation::{FieldErrors, FormField, LoginForm};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::{self, AuthFailure};
use crate::context::use_app_context;
use crate::models::Screen;
use crate::store::{store_sign_in, use_app_store};

#[component]
pub fn LoginScreen() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (show_password, set_show_password) = signal(false);
    let (errors, set_errors) = signal(FieldErrors::new());
    let (message, set_message) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get() { return; }
        let form = LoginForm::new(&username.get(), &password.get());
        set_message.set(None);
        set_loading.set(true);

        spawn_local(async move {
            match commands::login(&form).await {
                Ok(session) => {
                    set_errors.set(FieldErrors::new());
                    store_sign_in(&store, session.user);
                    ctx.replace(Screen::Home);
                }
                Err(AuthFailure::Fields(field_errors)) => set_errors.set(field_errors),
                Err(AuthFailure::Message(text)) => {
                    set_errors.set(FieldErrors::new());
                    set_message.set(Some(format!("Login failed: {}", text)));
                }
            }
            set_loading.set(false);
        });
    };

    let field_error = move |field: FormField| {
        move || errors.with(|e| e.get(field).map(|m| view! { <p class="field-error">{m.to_string()}</p> }))
    };

    view! {
        <div class="auth-screen">
            <h1 class="auth-title">"Chassis Records"</h1>
            <form class="auth-form" on:submit=submit>
                <label>"Username"</label>
                <input
                    type="text"
                    autocomplete="username"
                    prop:value=move || username.get()
                    on:input=move |ev| {
                        set_username.set(event_target_value(&ev));
                        set_errors.update(|e| e.clear(FormField::Username));
                    }
                />
                {field_error(FormField::Username)}

                <label>"Password"</label>
                <div class="password-row">
                    <input
                        type=move || if show_password.get() { "text" } else { "password" }
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| {
                            set_password.set(event_target_value(&ev));
                            set_errors.update(|e| e.clear(FormField::Password));
                        }
                    />
                    <button type="button" class="toggle-btn" on:click=move |_| set_show_password.update(|v| *v = !*v)>
                        {move || if show_password.get() { "Hide" } else { "Show" }}
                    </button>
                </div>
                {field_error(FormField::Password)}

                {move || message.get().map(|m| view! { <p class="error-banner">{m}</p> })}

                <button type="submit" class="primary-btn" disabled=move || loading.get()>
                    {move || if loading.get() { "Logging in..." } else { "Login" }}
                </button>
            </form>
            <p class="auth-switch">
                "Don't have an account? "
                <a href="#" on:click=move |ev| {
                    ev.prevent_default();
                    ctx.navigate(Screen::Register);
                }>"Register"</a>
            </p>
        </div>
    }
}
