//! Stack outputs exposed to operators and dependent stacks.

use serde_json::{Map, Value};

use crate::intrinsic::{Expr, fn_if, get_att, reference};
use crate::template::Template;

/// Declares the host, load balancer and database outputs in display order.
pub(super) fn declare(template: &mut Template) {
    template.declare_output(
        "CogBucket",
        output(
            fn_if(
                "CogBucketNameExists",
                reference("CogBucketName"),
                reference("CogBucket"),
            ),
            None,
        ),
    );
    template.declare_output("CogElbHostname", output(get_att("CogElbV2", "DNSName"), None));
    template.declare_output(
        "CogSecurityGroup",
        output(get_att("CogInstanceSecurityGroup", "GroupId"), None),
    );
    template.declare_output("CogInstanceRole", output(get_att("CogInstanceRole", "Arn"), None));

    // Only present when the stack provisions its own database.
    template.declare_output(
        "CogDatabaseHost",
        output(get_att("RdsDatabase", "Endpoint.Address"), Some("ProvisionRds")),
    );
    template.declare_output(
        "CogDatabasePort",
        output(get_att("RdsDatabase", "Endpoint.Port"), Some("ProvisionRds")),
    );
}

fn output(value: Expr, condition: Option<&str>) -> Value {
    let mut definition = Map::new();
    if let Some(condition) = condition {
        definition.insert("Condition".to_owned(), condition.into());
    }
    definition.insert("Value".to_owned(), value.to_value());
    Value::Object(definition)
}
