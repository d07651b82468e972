//! Built-in store type and runtime type tables

use crate::mapping::{MappingKind, TypeMapping};
use pgr_core::RuntimeType;
use std::collections::HashMap;
use std::sync::Arc;

/// Store type name (lowercase) to candidate descriptors, default first
pub(crate) type StoreTable = HashMap<String, Vec<Arc<TypeMapping>>>;

/// Runtime type to its default descriptor
pub(crate) type ClrTable = HashMap<RuntimeType, Arc<TypeMapping>>;

/// Descriptors the resolver specializes by facet
pub(crate) struct SizedDescriptors {
    /// `character varying`, the sized form of runtime strings
    pub varchar: Arc<TypeMapping>,
}

pub(crate) struct BuiltinTables {
    pub store: StoreTable,
    pub clr: ClrTable,
    pub sized: SizedDescriptors,
}

fn scalar(store_type: &str, clr_type: RuntimeType, kind: MappingKind) -> Arc<TypeMapping> {
    Arc::new(TypeMapping::new(store_type, clr_type, kind))
}

fn register(store: &mut StoreTable, names: &[&str], candidates: &[&Arc<TypeMapping>]) {
    for name in names {
        store
            .entry((*name).to_string())
            .or_default()
            .extend(candidates.iter().map(|m| Arc::clone(m)));
    }
}

fn range(store_type: &str, element: &Arc<TypeMapping>) -> Arc<TypeMapping> {
    Arc::new(TypeMapping::range(store_type, Arc::clone(element)))
}

/// Build the tables for the given capability flags
pub(crate) fn builtin_tables(legacy_geometry: bool) -> BuiltinTables {
    let boolean = scalar("boolean", RuntimeType::Bool, MappingKind::Bool);
    let bytea = scalar("bytea", RuntimeType::Bytes, MappingKind::Bytea);
    let real = scalar("real", RuntimeType::F32, MappingKind::Float4);
    let double = scalar("double precision", RuntimeType::F64, MappingKind::Float8);
    let numeric = scalar("numeric", RuntimeType::Decimal, MappingKind::Numeric);
    let money = scalar("money", RuntimeType::Decimal, MappingKind::Money);
    let uuid = scalar("uuid", RuntimeType::Uuid, MappingKind::Uuid);

    let smallint = scalar("smallint", RuntimeType::I16, MappingKind::Int2);
    let smallint_byte = scalar("smallint", RuntimeType::U8, MappingKind::Int2);
    let integer = scalar("integer", RuntimeType::I32, MappingKind::Int4);
    let bigint = scalar("bigint", RuntimeType::I64, MappingKind::Int8);

    let text = scalar("text", RuntimeType::String, MappingKind::Text);
    let jsonb = scalar("jsonb", RuntimeType::Json, MappingKind::Jsonb);
    let json = scalar("json", RuntimeType::Json, MappingKind::Json);
    let xml = scalar("xml", RuntimeType::String, MappingKind::Xml);
    let citext = scalar("citext", RuntimeType::String, MappingKind::Citext);
    let varchar = scalar("character varying", RuntimeType::String, MappingKind::VarChar);
    let character = scalar("character", RuntimeType::String, MappingKind::Char);

    let date = scalar("date", RuntimeType::Date, MappingKind::Date);
    let timestamp = scalar(
        "timestamp without time zone",
        RuntimeType::DateTime,
        MappingKind::Timestamp,
    );
    let timestamptz = scalar(
        "timestamp with time zone",
        RuntimeType::DateTime,
        MappingKind::TimestampTz,
    );
    let timestamptz_offset = scalar(
        "timestamp with time zone",
        RuntimeType::DateTimeOffset,
        MappingKind::TimestampTz,
    );
    let interval = scalar("interval", RuntimeType::TimeSpan, MappingKind::Interval);
    let time = scalar("time without time zone", RuntimeType::Time, MappingKind::Time);

    let macaddr = scalar("macaddr", RuntimeType::MacAddr, MappingKind::MacAddr);
    let inet = scalar("inet", RuntimeType::IpAddr, MappingKind::Inet);
    let cidr = scalar("cidr", RuntimeType::IpAddr, MappingKind::Cidr);

    let bit = scalar("bit", RuntimeType::BitString, MappingKind::Bit);
    let varbit = scalar("bit varying", RuntimeType::BitString, MappingKind::VarBit);
    let hstore = scalar("hstore", RuntimeType::Hstore, MappingKind::Hstore);
    let point = scalar("point", RuntimeType::Point, MappingKind::Point);

    let int4range = range("int4range", &integer);
    let int8range = range("int8range", &bigint);
    let numrange = range("numrange", &numeric);
    let tsrange = range("tsrange", &timestamp);
    let tstzrange = range("tstzrange", &timestamptz);
    let tstzrange_offset = range("tstzrange", &timestamptz_offset);
    let daterange = range("daterange", &date);

    let mut store = StoreTable::new();
    register(&mut store, &["boolean", "bool"], &[&boolean]);
    register(&mut store, &["bytea"], &[&bytea]);
    register(&mut store, &["real", "float4"], &[&real]);
    register(&mut store, &["double precision", "float8"], &[&double]);
    register(&mut store, &["numeric", "decimal"], &[&numeric]);
    register(&mut store, &["money"], &[&money]);
    register(&mut store, &["uuid"], &[&uuid]);

    register(&mut store, &["smallint", "int2"], &[&smallint, &smallint_byte]);
    register(&mut store, &["integer", "int", "int4"], &[&integer]);
    register(&mut store, &["bigint", "int8"], &[&bigint]);

    register(&mut store, &["text"], &[&text]);
    register(&mut store, &["jsonb"], &[&jsonb]);
    register(&mut store, &["json"], &[&json]);
    register(&mut store, &["xml"], &[&xml]);
    register(&mut store, &["citext"], &[&citext]);
    register(&mut store, &["character varying", "varchar"], &[&varchar]);
    register(&mut store, &["character", "char"], &[&character]);

    register(&mut store, &["date"], &[&date]);
    register(&mut store, &["timestamp without time zone", "timestamp"], &[&timestamp]);
    register(
        &mut store,
        &["timestamp with time zone", "timestamptz"],
        &[&timestamptz, &timestamptz_offset],
    );
    register(&mut store, &["interval"], &[&interval]);
    register(&mut store, &["time without time zone", "time"], &[&time]);

    register(&mut store, &["macaddr"], &[&macaddr]);
    register(&mut store, &["inet"], &[&inet]);
    register(&mut store, &["cidr"], &[&cidr]);

    register(&mut store, &["bit"], &[&bit]);
    register(&mut store, &["bit varying", "varbit"], &[&varbit]);
    register(&mut store, &["hstore"], &[&hstore]);
    register(&mut store, &["point"], &[&point]);

    register(&mut store, &["int4range"], &[&int4range]);
    register(&mut store, &["int8range"], &[&int8range]);
    register(&mut store, &["numrange"], &[&numrange]);
    register(&mut store, &["tsrange"], &[&tsrange]);
    register(&mut store, &["tstzrange"], &[&tstzrange, &tstzrange_offset]);
    register(&mut store, &["daterange"], &[&daterange]);

    let mut clr = ClrTable::new();
    for mapping in [
        &boolean,
        &bytea,
        &real,
        &double,
        &numeric,
        &uuid,
        &smallint_byte,
        &smallint,
        &integer,
        &bigint,
        &text,
        &timestamp,
        &timestamptz_offset,
        &interval,
        &date,
        &time,
        &macaddr,
        &inet,
        &varbit,
        &hstore,
        &jsonb,
        &point,
        &int4range,
        &int8range,
        &numrange,
        &tsrange,
        &tstzrange_offset,
        &daterange,
    ] {
        clr.insert(mapping.clr_type().clone(), Arc::clone(mapping));
    }

    if legacy_geometry {
        let geometry = scalar("geometry", RuntimeType::Geometry, MappingKind::LegacyGeometry);
        register(&mut store, &["geometry"], &[&geometry]);
        clr.insert(RuntimeType::Geometry, geometry);
    }

    BuiltinTables {
        store,
        clr,
        sized: SizedDescriptors { varchar },
    }
}
