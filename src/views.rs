//! Server-rendered HTML pages.

use crate::form::RegistrationForm;
use crate::registry::UserRecord;
use crate::validation::MaritalStatus;

/// Escapes text for use in element content and quoted attributes.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"pt-BR\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{}</title>\n\
         </head>\n\
         <body>\n{}</body>\n\
         </html>\n",
        escape(title),
        body
    )
}

/// `GET /usuarios`
pub fn users_page(users: &[UserRecord]) -> String {
    let mut body = String::from(
        "<h1>Usuários</h1>\n\
         <p><a href=\"/cadastro\">Cadastrar usuário</a></p>\n\
         <table>\n\
         <thead><tr><th>ID</th><th>Nome</th><th>Email</th><th>Data de Nascimento</th>\
         <th>Sexo</th><th>Estado Civil</th><th>Renda Mensal</th><th>Endereço</th><th></th></tr></thead>\n\
         <tbody>\n",
    );

    for user in users {
        let marital_status = user.marital_status.map(|s| s.as_str()).unwrap_or_default();
        body.push_str(&format!(
            "<tr><td>{id}</td><td>{name}</td><td>{email}</td><td>{birth}</td><td>{sex}</td>\
             <td>{marital}</td><td>{income}</td><td>{address}</td>\
             <td><form method=\"POST\" action=\"/usuarios/{id}?_method=DELETE\">\
             <button type=\"submit\">Excluir</button></form></td></tr>\n",
            id = user.id,
            name = escape(&user.name),
            email = escape(&user.email),
            birth = escape(&user.birth_date),
            sex = escape(&user.sex),
            marital = escape(marital_status),
            income = escape(&user.monthly_income),
            address = escape(&format_address(user)),
        ));
    }

    body.push_str("</tbody>\n</table>\n");
    layout("Usuários", &body)
}

fn format_address(user: &UserRecord) -> String {
    let parts = [
        user.street.as_str(),
        user.number.as_str(),
        user.complement.as_str(),
        user.city.as_str(),
        user.state.as_str(),
    ];
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}

/// `GET /cadastro`, and the re-rendered form after a rejected submission.
pub fn registration_page(error: Option<&str>, form: &RegistrationForm) -> String {
    let mut body = String::from("<h1>Cadastro de Usuário</h1>\n");

    if let Some(message) = error {
        body.push_str(&format!("<p class=\"erro\">{}</p>\n", escape(message)));
    }

    body.push_str("<form method=\"POST\" action=\"/usuarios\">\n");
    text_input(&mut body, "nome", "Nome", "text", &form.name);
    text_input(&mut body, "cpf", "CPF", "text", &form.cpf);
    text_input(&mut body, "dataNascimento", "Data de Nascimento", "date", &form.birth_date);
    text_input(&mut body, "sexo", "Sexo", "text", &form.sex);

    body.push_str("<label for=\"estadoCivil\">Estado Civil</label>\n<select id=\"estadoCivil\" name=\"estadoCivil\">\n");
    for status in MaritalStatus::ALL {
        let selected = if form.marital_status == status.as_str() {
            " selected"
        } else {
            ""
        };
        body.push_str(&format!(
            "<option value=\"{value}\"{selected}>{value}</option>\n",
            value = escape(status.as_str()),
        ));
    }
    body.push_str("</select>\n");

    text_input(&mut body, "rendaMensal", "Renda Mensal", "text", &form.monthly_income);
    text_input(&mut body, "logradouro", "Logradouro", "text", &form.street);
    text_input(&mut body, "estado", "Estado", "text", &form.state);
    text_input(&mut body, "cidade", "Cidade", "text", &form.city);
    text_input(&mut body, "numero", "Número", "text", &form.number);
    text_input(&mut body, "complemento", "Complemento", "text", &form.complement);
    body.push_str("<button type=\"submit\">Cadastrar</button>\n</form>\n");

    layout("Cadastro", &body)
}

fn text_input(body: &mut String, name: &str, label: &str, kind: &str, value: &str) {
    body.push_str(&format!(
        "<label for=\"{name}\">{label}</label>\n\
         <input type=\"{kind}\" id=\"{name}\" name=\"{name}\" value=\"{value}\">\n",
        value = escape(value),
    ));
}

/// `GET /completed`
pub fn completed_page() -> String {
    layout(
        "Cadastro concluído",
        "<h1>Cadastro concluído</h1>\n\
         <p>O cadastro foi realizado com sucesso.</p>\n\
         <p><a href=\"/usuarios\">Ver usuários</a></p>\n",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::UserRegistry;

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape(r#"<a href="x">O'Neil & co</a>"#),
            "&lt;a href=&quot;x&quot;&gt;O&#39;Neil &amp; co&lt;/a&gt;"
        );
    }

    #[test]
    fn users_page_lists_every_record_with_delete_form() {
        let registry = UserRegistry::seeded();
        let page = users_page(registry.list());

        assert!(page.contains("Usuário 1"));
        assert!(page.contains("usuario2@gmail.com"));
        assert!(page.contains("action=\"/usuarios/1?_method=DELETE\""));
        assert!(page.contains("action=\"/usuarios/2?_method=DELETE\""));
    }

    #[test]
    fn registration_page_echoes_values_and_error() {
        let form = RegistrationForm {
            name: "Jo".to_string(),
            city: "<script>".to_string(),
            marital_status: "Viúvo(a)".to_string(),
            ..RegistrationForm::default()
        };
        let page = registration_page(Some("Nome deve conter no mínimo 3 caracteres."), &form);

        assert!(page.contains("<p class=\"erro\">Nome deve conter no mínimo 3 caracteres.</p>"));
        assert!(page.contains("name=\"nome\" value=\"Jo\""));
        assert!(page.contains("value=\"&lt;script&gt;\""));
        assert!(page.contains("<option value=\"Viúvo(a)\" selected>"));
    }

    #[test]
    fn empty_registration_page_has_no_error() {
        let page = registration_page(None, &RegistrationForm::default());

        assert!(!page.contains("class=\"erro\""));
        assert!(page.contains("action=\"/usuarios\""));
    }
}
